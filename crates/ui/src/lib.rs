#![forbid(unsafe_code)]

pub mod assets;
pub mod document;
pub mod pages;
pub mod vm;

pub use pages::{
    LearnVm, render_congratulations, render_error, render_home, render_learn, render_skill,
    render_step,
};
