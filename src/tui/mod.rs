//! Terminal dashboard: Elm-style event loop, views, and widgets.

pub mod app;
pub mod events;
pub mod layout;
pub mod services;
pub mod theme;
pub mod views;
pub mod widgets;
