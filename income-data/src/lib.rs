mod loader;

pub use loader::{FormLoader, FormLoaderError};
