//! Consulta dados cadastrais de uma empresa na ReceitaWS pelo CNPJ e grava o
//! resultado numa planilha Excel de uma linha.

pub mod api;
pub mod cnpj;
pub mod export;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod ui;
pub mod utils;
