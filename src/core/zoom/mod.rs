mod zoom_stack;

pub use zoom_stack::ZoomStack;
