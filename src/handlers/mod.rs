pub mod billing;
pub mod helpers;
pub mod pages;
pub mod pricing;
pub mod proxy;
pub mod system;
