//! Two terminal arcade games, Flappy and Snake, running on one
//! fixed-timestep loop core.

pub mod app;
pub mod assets;
pub mod audio;
pub mod canvas;
pub mod config;
pub mod context;
pub mod engine;
pub mod error;
pub mod event;
pub mod games;
pub mod input;
pub mod runner;
pub mod ui;
