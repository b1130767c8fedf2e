use crate::core::data::colour::Colour;

/// Total mapping from a value to a display colour.
pub trait ColourMap<T> {
    fn map(&self, value: T) -> Colour;

    fn display_name(&self) -> &str;
}
