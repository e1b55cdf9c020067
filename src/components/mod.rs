pub mod architecture;
pub mod panels;
