#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// Client-side path change (button click or typed location).
    Navigate(String),
    /// User edited the title input.
    TitleChanged(String),
    /// User edited the price input.
    PriceChanged(String),
    /// User pressed the form's submit control.
    SubmitClicked,
    /// Engine finished the list read issued for `request_id`.
    ProductsLoaded {
        request_id: crate::RequestId,
        result: Result<Vec<crate::Product>, crate::LoadFailure>,
    },
    /// Engine finished the create request issued for `request_id`.
    ProductCreated {
        request_id: crate::RequestId,
        result: Result<crate::CreatedProduct, crate::SubmitFailure>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
