use gophkeeper_derive::gophkeeper_error;

#[gophkeeper_error]
pub enum DemoError {
    #[error("IO error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
