#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("layout parameter `{name}` must be finite and non-negative, got {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("grid cell has zero area ({width}x{height}); node size plus padding must be positive")]
    DegenerateCell { width: f64, height: f64 },

    #[error("grid of {rows}x{cols} cells exceeds the supported cell count")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("target item is not part of the item set: {id}")]
    UnknownTarget { id: String },

    #[error("item set contains a duplicate id: {id}")]
    DuplicateItem { id: String },
}

pub type Result<T> = std::result::Result<T, Error>;
