pub mod codec;
pub mod store;

pub use codec::{decode_bytes, decode_line, encode_point};
pub use store::{load, load_autosave, save, save_autosave, LoadReport};
