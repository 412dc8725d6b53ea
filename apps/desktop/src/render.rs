//! Plain-text rendering of the library screen.

use client_core::{
    screen::{CollectionView, DeleteDialog, EditDialog, LibraryScreen},
    EditableField,
};
use shared::domain::Book;

pub fn render_screen(screen: &LibraryScreen) -> String {
    let mut out = String::new();
    push_line(&mut out, &screen.heading);
    push_line(&mut out, &"=".repeat(screen.heading.len()));
    if let Some(banner) = &screen.error_banner {
        push_line(&mut out, &format!("! {banner}"));
    }
    out.push('\n');

    match &screen.collection {
        CollectionView::Loading { placeholders } => {
            for _ in 0..*placeholders {
                push_line(&mut out, "  [ .......... loading .......... ]");
            }
        }
        CollectionView::Empty { message } => {
            push_line(&mut out, &format!("  {message}"));
        }
        CollectionView::Cards(books) => {
            for book in books {
                out.push_str(&render_card(book));
            }
        }
    }

    if let Some(dialog) = &screen.delete_dialog {
        out.push('\n');
        out.push_str(&render_delete_dialog(dialog));
    }
    if let Some(dialog) = &screen.edit_dialog {
        out.push('\n');
        out.push_str(&render_edit_dialog(dialog));
    }
    out
}

pub fn render_card(book: &Book) -> String {
    let status = if book.read { "read" } else { "unread" };
    format!(
        "  #{} {}\n     {} | {} | {} pages | {}\n     {}\n",
        book.id, book.title, book.author, book.genre, book.page_count, status, book.description
    )
}

pub fn render_delete_dialog(dialog: &DeleteDialog) -> String {
    let mut out = String::new();
    push_line(&mut out, &dialog.prompt());
    if let Some(error) = &dialog.error {
        push_line(&mut out, &format!("! {error}"));
    }
    push_line(&mut out, "[Cancel] [Delete]");
    out
}

pub fn render_edit_dialog(dialog: &EditDialog) -> String {
    let draft = &dialog.draft;
    let page_count = draft
        .page_count
        .map(|count| count.to_string())
        .unwrap_or_default();
    let rows = [
        (EditableField::Title, "Title", draft.title.clone()),
        (EditableField::Author, "Author", draft.author.clone()),
        (EditableField::Genre, "Genre", draft.genre.clone()),
        (EditableField::PageCount, "Page Count", page_count),
        (
            EditableField::Description,
            "Description",
            draft.description.clone(),
        ),
    ];

    let mut out = String::new();
    push_line(&mut out, "Edit Book");
    for (field, label, value) in rows {
        let marker = if dialog.is_marked(field) {
            "  <- required"
        } else {
            ""
        };
        push_line(&mut out, &format!("  {label}: {value}{marker}"));
    }
    let checkbox = if draft.read { "x" } else { " " };
    push_line(&mut out, &format!("  [{checkbox}] Already read?"));
    if let Some(error) = &dialog.error {
        push_line(&mut out, &format!("! {error}"));
    }
    push_line(&mut out, "[Save Changes] [Cancel]");
    out
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
