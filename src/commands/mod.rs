pub mod detect;
pub mod rewrite;
pub mod which;
