use gophkeeper_derive::gophkeeper_error;

#[gophkeeper_error]
pub enum DemoError {
    #[error("IO error: {0}")]
    Io(std::io::Error),
}

fn main() {}
