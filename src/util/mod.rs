mod descriptor;
mod expanded_path;
mod mode;
mod seek_origin;

pub use self::descriptor::Descriptor;
pub use self::expanded_path::ExpandedPath;
pub use self::mode::{Flags, Mode};
pub use self::seek_origin::SeekOrigin;
