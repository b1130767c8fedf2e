pub mod adapter;
pub mod ascii;
pub mod presenter;

pub use adapter::TerminalAdapter;
pub use presenter::TerminalPresenter;
