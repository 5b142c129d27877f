use catalog_core::{
    AppViewModel, ButtonView, FieldView, ListContent, NotFoundView, PageView, ProductFormView,
    ProductListView, ShellView,
};

/// Renders the view model as terminal lines. Buttons are numbered in the
/// order `PageView::buttons` returns them so input can refer to them.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![format!("=== {} ===", view.location)];
    let mut numbering = ButtonNumbering::default();

    match &view.page {
        PageView::Shell(shell) => render_shell(&mut lines, &mut numbering, shell),
        PageView::ProductList(list) => render_list(&mut lines, &mut numbering, list),
        PageView::ProductForm(form) => render_form(&mut lines, &mut numbering, form),
        PageView::NotFound(not_found) => render_not_found(&mut lines, &mut numbering, not_found),
    }
    lines
}

#[derive(Default)]
struct ButtonNumbering {
    next: usize,
}

impl ButtonNumbering {
    fn label(&mut self, button: &ButtonView) -> String {
        self.next += 1;
        if button.enabled {
            format!("[{}] {}", self.next, button.label)
        } else {
            format!("[{}] {} (disabled)", self.next, button.label)
        }
    }

    fn row(&mut self, buttons: &[ButtonView]) -> String {
        buttons
            .iter()
            .map(|button| self.label(button))
            .collect::<Vec<_>>()
            .join("   ")
    }
}

fn render_shell(lines: &mut Vec<String>, numbering: &mut ButtonNumbering, shell: &ShellView) {
    lines.push(shell.heading.clone());
    for button in &shell.buttons {
        lines.push(numbering.label(button));
    }
}

fn render_list(lines: &mut Vec<String>, numbering: &mut ButtonNumbering, list: &ProductListView) {
    lines.push(numbering.row(&list.buttons));
    match &list.content {
        ListContent::Loading { message } => lines.push(message.clone()),
        ListContent::Loaded { rows } => {
            if rows.is_empty() {
                lines.push("(no products)".to_string());
            }
            for (position, row) in rows.iter().enumerate() {
                lines.push(format!(
                    "{:>3}. [img src={:?} alt={:?}] {}",
                    position + 1,
                    row.thumbnail_src,
                    row.thumbnail_alt,
                    row.title
                ));
            }
        }
        ListContent::Failed { heading, message } => {
            lines.push(heading.clone());
            lines.push(message.clone());
        }
    }
}

fn render_field(field: &FieldView) -> Vec<String> {
    let mut hints = Vec::new();
    if field.required {
        hints.push("required");
    }
    if field.numeric {
        hints.push("number");
    }
    let value = if field.value.is_empty() {
        format!("<{}>", field.placeholder)
    } else {
        field.value.clone()
    };

    let mut lines = vec![format!("{} {} ({})", field.label, value, hints.join(", "))];
    if let Some(error) = &field.error {
        lines.push(format!("  ! {error}"));
    }
    lines
}

fn render_form(lines: &mut Vec<String>, numbering: &mut ButtonNumbering, form: &ProductFormView) {
    lines.push(form.heading.clone());
    lines.extend(render_field(&form.title_field));
    lines.extend(render_field(&form.price_field));
    lines.push(numbering.label(&form.submit));
    if let Some(confirmation) = &form.confirmation {
        lines.push(confirmation.clone());
    }
    if let Some(error) = &form.error {
        lines.push(format!("Error: {error}"));
    }
    lines.push(numbering.row(&form.buttons));
}

fn render_not_found(
    lines: &mut Vec<String>,
    numbering: &mut ButtonNumbering,
    not_found: &NotFoundView,
) {
    lines.push(not_found.heading.clone());
    lines.push(not_found.message.clone());
    lines.push(numbering.row(&not_found.buttons));
}
