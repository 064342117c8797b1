pub mod board;
pub mod clipboard;
pub mod dither;
pub mod editor;
pub mod gui;
pub mod logging;
pub mod settings;
pub mod storage;
