pub mod docx;
pub mod export;
pub mod instructions;
