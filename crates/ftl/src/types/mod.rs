mod number;
mod value;

pub(crate) use number::language_of;
pub use number::{NumberOptions, NumberStyle, NumberValue, PluralType};
pub use value::{Args, CustomValue, Value};
