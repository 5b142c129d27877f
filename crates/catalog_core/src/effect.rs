#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Read the product collection for the list view instance `request_id`.
    FetchProducts { request_id: crate::RequestId },
    /// Send a create request for the form submission `request_id`.
    CreateProduct {
        request_id: crate::RequestId,
        product: crate::NewProduct,
    },
}
