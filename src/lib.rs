pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod page;
pub mod ready;
pub mod tasks {
    pub mod carousel;
    pub mod input;
    pub mod theme;
}
