use serde_json::{Map, Value};
use thiserror::Error;

/// Registro de empresa como devolvido pela ReceitaWS.
///
/// Não há esquema fixo: as chaves variam de empresa para empresa e a ordem
/// de chegada é preservada, pois vira a ordem das colunas na planilha.
pub type RegistroEmpresa = Map<String, Value>;

/// Valor do campo `status` que a ReceitaWS usa para sinalizar erro.
pub const STATUS_ERRO: &str = "ERROR";

/// Falhas da consulta, recuperadas localmente e devolvidas como valor.
#[derive(Debug, Error)]
pub enum ErroConsulta {
    #[error("Resposta HTTP com status {0}")]
    Status(u16),

    #[error("Erro na decodificação do JSON.")]
    Json,

    #[error("Falha na comunicação com a ReceitaWS: {0}")]
    Transporte(String),
}

/// Estrutura inesperada em um campo aninhado durante o achatamento.
#[derive(Debug, Error, PartialEq)]
pub enum ErroNormalizacao {
    #[error("campo '{campo}' deveria ser uma lista de objetos")]
    NaoELista { campo: String },

    #[error("campo '{campo}', item {indice}: esperado um objeto")]
    ItemNaoEObjeto { campo: String, indice: usize },

    #[error("campo '{campo}', item {indice}: chave '{chave}' ausente")]
    ChaveAusente {
        campo: String,
        indice: usize,
        chave: &'static str,
    },

    #[error("campo '{campo}', item {indice}: chave '{chave}' deveria ser texto")]
    ChaveNaoETexto {
        campo: String,
        indice: usize,
        chave: &'static str,
    },
}

/// Desfecho da etapa de exportação.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultadoExportacao {
    Salvo(std::path::PathBuf),
    Ignorado { mensagem: String },
}

/// Verdadeiro quando o próprio corpo da resposta traz `status: "ERROR"`.
pub fn tem_status_erro(registro: &RegistroEmpresa) -> bool {
    registro.get("status").and_then(Value::as_str) == Some(STATUS_ERRO)
}
