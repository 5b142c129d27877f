use std::sync::Once;

use catalog_core::{
    update, AppState, CreatedProduct, Effect, Msg, NewProduct, PageView, ProductFormView,
    SubmitFailure, ADD_PRODUCT_PATH, HOME_PATH,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn open_form() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Navigate(ADD_PRODUCT_PATH.to_string()));
    state
}

fn fill(state: AppState, title: &str, price: &str) -> AppState {
    let (state, _) = update(state, Msg::TitleChanged(title.to_string()));
    let (state, _) = update(state, Msg::PriceChanged(price.to_string()));
    state
}

fn form(state: &AppState) -> ProductFormView {
    match state.view().page {
        PageView::ProductForm(form) => form,
        other => panic!("expected form view, got {other:?}"),
    }
}

fn created(id: u64, title: &str, price: f64) -> CreatedProduct {
    CreatedProduct {
        id,
        title: title.to_string(),
        price,
    }
}

#[test]
fn submit_sends_numeric_price_and_resets_on_success() {
    init_logging();
    let state = fill(open_form(), "Product 1", "10");
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert_eq!(
        effects,
        vec![Effect::CreateProduct {
            request_id: 1,
            product: NewProduct {
                title: "Product 1".to_string(),
                price: 10.0,
            },
        }]
    );

    let (state, effects) = update(
        state,
        Msg::ProductCreated {
            request_id: 1,
            result: Ok(created(1, "Product 1", 10.0)),
        },
    );
    assert!(effects.is_empty());

    let view = form(&state);
    assert_eq!(
        view.confirmation.as_deref(),
        Some("Product added: Product 1 (ID: 1)")
    );
    assert_eq!(view.title_field.value, "");
    assert_eq!(view.price_field.value, "");
    assert_eq!(view.submit.label, "Add Product");
    assert!(view.submit.enabled);
    assert!(view.error.is_none());
}

#[test]
fn pending_submission_disables_control_and_blocks_resubmit() {
    init_logging();
    let state = fill(open_form(), "Loading Product", "10");
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);

    let view = form(&state);
    assert_eq!(view.submit.label, "Submitting...");
    assert!(!view.submit.enabled);
    assert!(view.is_submitting());

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());

    // Fields stay editable while the request is outstanding.
    let (state, _) = update(state, Msg::TitleChanged("Edited".to_string()));
    assert_eq!(form(&state).title_field.value, "Edited");
    assert!(form(&state).is_submitting());
}

#[test]
fn fractional_price_is_kept() {
    init_logging();
    let state = fill(open_form(), "My Product", "99.99");
    let (_state, effects) = update(state, Msg::SubmitClicked);

    let Some(Effect::CreateProduct { product, .. }) = effects.first() else {
        panic!("expected create effect, got {effects:?}");
    };
    assert_eq!(product.price, 99.99);
    assert_eq!(product.title, "My Product");
}

#[test]
fn empty_fields_are_rejected_before_any_request() {
    init_logging();
    let (state, effects) = update(open_form(), Msg::SubmitClicked);
    assert!(effects.is_empty());
    let view = form(&state);
    assert_eq!(view.title_field.error.as_deref(), Some("Title is required"));
    assert!(view.price_field.error.is_none());
    assert!(view.submit.enabled);

    let (state, _) = update(state, Msg::TitleChanged("Lamp".to_string()));
    assert!(form(&state).title_field.error.is_none());

    let (state, effects) = update(state, Msg::SubmitClicked);
    assert!(effects.is_empty());
    assert_eq!(
        form(&state).price_field.error.as_deref(),
        Some("Price is required")
    );
}

#[test]
fn non_numeric_price_is_rejected_at_input() {
    init_logging();
    let state = fill(open_form(), "Lamp", "cheap");
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    assert!(form(&state).price_field.error.is_some());
}

#[test]
fn failure_keeps_entered_values() {
    init_logging();
    let state = fill(open_form(), "Test", "10");
    let (state, effects) = update(state, Msg::SubmitClicked);
    let Some(Effect::CreateProduct { request_id, .. }) = effects.first().cloned() else {
        panic!("expected create effect");
    };

    let (state, _) = update(
        state,
        Msg::ProductCreated {
            request_id,
            result: Err(SubmitFailure::new("http status 400")),
        },
    );

    let view = form(&state);
    assert_eq!(view.error.as_deref(), Some("Failed to add product"));
    assert_eq!(view.title_field.value, "Test");
    assert_eq!(view.price_field.value, "10");
    assert!(view.confirmation.is_none());
    assert!(view.submit.enabled);

    // The user can retry straight away.
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(effects.len(), 1);
    assert!(form(&state).error.is_none());
}

#[test]
fn result_for_left_form_is_discarded() {
    init_logging();
    let state = fill(open_form(), "Test", "10");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(state, Msg::Navigate(HOME_PATH.to_string()));
    let (mut state, _) = update(state, Msg::Navigate(ADD_PRODUCT_PATH.to_string()));
    assert!(state.consume_dirty());

    let (mut state, _) = update(
        state,
        Msg::ProductCreated {
            request_id: 1,
            result: Ok(created(1, "Test", 10.0)),
        },
    );

    assert!(!state.consume_dirty());
    let view = form(&state);
    assert!(view.confirmation.is_none());
    assert!(!view.is_submitting());
}

#[test]
fn second_submission_replaces_confirmation() {
    init_logging();
    let state = fill(open_form(), "First", "1");
    let (state, _) = update(state, Msg::SubmitClicked);
    let (state, _) = update(
        state,
        Msg::ProductCreated {
            request_id: 1,
            result: Ok(created(101, "First", 1.0)),
        },
    );

    let state = fill(state, "Second", "2");
    let (state, effects) = update(state, Msg::SubmitClicked);
    assert_eq!(
        effects,
        vec![Effect::CreateProduct {
            request_id: 2,
            product: NewProduct {
                title: "Second".to_string(),
                price: 2.0,
            },
        }]
    );
    // Previous confirmation stays visible until the new answer arrives.
    assert_eq!(
        form(&state).confirmation.as_deref(),
        Some("Product added: First (ID: 101)")
    );

    let (state, _) = update(
        state,
        Msg::ProductCreated {
            request_id: 2,
            result: Ok(created(102, "Second", 2.0)),
        },
    );
    assert_eq!(
        form(&state).confirmation.as_deref(),
        Some("Product added: Second (ID: 102)")
    );
}
