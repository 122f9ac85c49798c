use gophkeeper_derive::gophkeeper_error;

#[gophkeeper_error]
pub enum DemoError {
    #[error("Validation error: {message}")]
    Validation { message: String, context: Option<String> },
}

fn main() {}
