use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Navigate(location) => state.navigate(location),
        Msg::TitleChanged(title) => {
            state.set_title(title);
            Vec::new()
        }
        Msg::PriceChanged(price) => {
            state.set_price(price);
            Vec::new()
        }
        Msg::SubmitClicked => state.submit(),
        Msg::ProductsLoaded { request_id, result } => {
            state.apply_products_loaded(request_id, result);
            Vec::new()
        }
        Msg::ProductCreated { request_id, result } => {
            state.apply_created(request_id, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
