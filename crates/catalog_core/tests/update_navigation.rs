use std::sync::Once;

use catalog_core::{
    update, AppState, ButtonAction, Effect, ListContent, Msg, PageView, RouteEntry, RouteTable,
    ViewKind, ADD_PRODUCT_PATH, HOME_PATH, PRODUCTS_PATH,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(catalog_logging::initialize_for_tests);
}

fn navigate(state: AppState, path: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::Navigate(path.to_string()))
}

fn button_targets(page: &PageView) -> Vec<(String, ButtonAction)> {
    page.buttons()
        .into_iter()
        .map(|button| (button.label.clone(), button.action.clone()))
        .collect()
}

#[test]
fn shell_offers_list_and_form_without_network_calls() {
    init_logging();
    let (mut state, effects) = navigate(AppState::new(), HOME_PATH);
    let view = state.view();

    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    let PageView::Shell(shell) = &view.page else {
        panic!("expected shell, got {:?}", view.page);
    };
    assert_eq!(shell.heading, "Home");
    assert_eq!(
        button_targets(&view.page),
        vec![
            (
                "Go to Products".to_string(),
                ButtonAction::Navigate(PRODUCTS_PATH.to_string())
            ),
            (
                "Add Product".to_string(),
                ButtonAction::Navigate(ADD_PRODUCT_PATH.to_string())
            ),
        ]
    );
}

#[test]
fn entering_list_issues_one_read() {
    init_logging();
    let (state, effects) = navigate(AppState::new(), PRODUCTS_PATH);

    assert_eq!(effects, vec![Effect::FetchProducts { request_id: 1 }]);
    let PageView::ProductList(list) = state.view().page else {
        panic!("expected list view");
    };
    assert_eq!(
        list.content,
        ListContent::Loading {
            message: "Loading products...".to_string()
        }
    );
}

#[test]
fn revisiting_list_reissues_read() {
    init_logging();
    let (state, first) = navigate(AppState::new(), PRODUCTS_PATH);
    let (state, _) = navigate(state, HOME_PATH);
    let (_state, second) = navigate(state, PRODUCTS_PATH);

    assert_eq!(first, vec![Effect::FetchProducts { request_id: 1 }]);
    assert_eq!(second, vec![Effect::FetchProducts { request_id: 2 }]);
}

#[test]
fn form_route_has_no_loader() {
    init_logging();
    let (state, effects) = navigate(AppState::new(), ADD_PRODUCT_PATH);

    assert!(effects.is_empty());
    let PageView::ProductForm(form) = state.view().page else {
        panic!("expected form view");
    };
    assert!(form.title_field.required);
    assert!(form.price_field.required);
    assert!(form.price_field.numeric);
    assert_eq!(form.submit.label, "Add Product");
    assert!(form.submit.enabled);
    assert_eq!(
        form.buttons[0].action,
        ButtonAction::Navigate(HOME_PATH.to_string())
    );
}

#[test]
fn unknown_path_renders_not_found_with_way_home() {
    init_logging();
    let (state, effects) = navigate(AppState::new(), "/cart");

    assert!(effects.is_empty());
    assert_eq!(state.location(), "/cart");
    let PageView::NotFound(view) = state.view().page else {
        panic!("expected not-found view");
    };
    assert!(view.message.contains("/cart"));
    assert_eq!(
        view.buttons[0].action,
        ButtonAction::Navigate(HOME_PATH.to_string())
    );
}

#[test]
fn query_string_still_matches_route() {
    init_logging();
    let (state, effects) = navigate(AppState::new(), "/products?page=2");

    assert_eq!(effects.len(), 1);
    assert_eq!(state.location(), "/products?page=2");
    assert!(matches!(state.view().page, PageView::ProductList(_)));
}

#[test]
fn custom_table_list_without_loader_resolves_empty() {
    init_logging();
    let routes = RouteTable::new(vec![
        RouteEntry::new(HOME_PATH, ViewKind::Shell),
        RouteEntry::new(PRODUCTS_PATH, ViewKind::ProductList),
    ]);
    let (state, effects) = navigate(AppState::with_routes(routes), PRODUCTS_PATH);

    assert!(effects.is_empty());
    let PageView::ProductList(list) = state.view().page else {
        panic!("expected list view");
    };
    assert_eq!(list.content, ListContent::Loaded { rows: Vec::new() });
}

#[test]
fn custom_table_form_without_action_ignores_submit() {
    init_logging();
    let routes = RouteTable::new(vec![RouteEntry::new("/", ViewKind::ProductForm)]);
    let (state, _) = navigate(AppState::with_routes(routes), "/");
    let (state, _) = update(state, Msg::TitleChanged("Lamp".to_string()));
    let (state, _) = update(state, Msg::PriceChanged("4".to_string()));
    let (state, effects) = update(state, Msg::SubmitClicked);

    assert!(effects.is_empty());
    let PageView::ProductForm(form) = state.view().page else {
        panic!("expected form view");
    };
    assert!(!form.is_submitting());
}
