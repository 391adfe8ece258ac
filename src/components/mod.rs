//! UI Components
//!
//! Leptos views for the catalog: list, details, form, login and registration.

mod delete_confirm_button;
mod header;
mod item_card;
mod item_details;
mod item_form;
mod items_list;
mod login_form;
mod register_form;

pub use delete_confirm_button::DeleteConfirmButton;
pub use header::Header;
pub use item_card::{cover_image, swap_to_placeholder, ItemCard};
pub use item_details::{property_rows, ItemDetails};
pub use item_form::ItemForm;
pub use items_list::ItemsList;
pub use login_form::{login_errors, LoginForm};
pub use register_form::{RegisterErrors, RegisterForm, RegisterInput};
