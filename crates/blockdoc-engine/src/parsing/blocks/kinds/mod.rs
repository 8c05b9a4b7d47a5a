pub mod code_fence;
pub mod embed;
pub mod list;
pub mod quote;
pub mod table;

pub use code_fence::CodeFence;
pub use embed::{Embed, EmbedRef};
pub use list::{Bullet, Checklist, Divider, Heading, Ordered};
pub use quote::{Callout, Quote, Toggle};
pub use table::TableRow;
