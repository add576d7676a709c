use serde_json::{Map, Value};
use crate::models::{ErroNormalizacao, RegistroEmpresa};

const SEPARADOR: &str = "; ";

/// Campos em lista de `{ "text": ... }` (atividades econômicas).
const CAMPOS_ATIVIDADE: [&str; 2] = ["atividade_principal", "atividades_secundarias"];

/// Campos convertidos para texto independentemente do formato.
const CAMPOS_TEXTUAIS: [&str; 2] = ["billing", "extra"];

/// Achata os campos aninhados conhecidos para que caibam numa célula.
///
/// Só mexe em `atividade_principal`, `atividades_secundarias`, `qsa`,
/// `billing` e `extra`, e apenas quando presentes. O registro é alterado no
/// lugar; em caso de erro ele pode ter ficado parcialmente achatado.
pub fn achatar_campos(registro: &mut RegistroEmpresa) -> Result<(), ErroNormalizacao> {
    for campo in CAMPOS_ATIVIDADE {
        if let Some(valor) = registro.get_mut(campo) {
            let texto = juntar_atividades(campo, valor)?;
            *valor = Value::String(texto);
        }
    }

    if let Some(valor) = registro.get_mut("qsa") {
        let texto = juntar_socios(valor)?;
        *valor = Value::String(texto);
    }

    for campo in CAMPOS_TEXTUAIS {
        if let Some(valor) = registro.get_mut(campo) {
            *valor = Value::String(representacao_textual(valor));
        }
    }

    Ok(())
}

fn juntar_atividades(campo: &str, valor: &Value) -> Result<String, ErroNormalizacao> {
    let itens = itens_objeto(campo, valor)?;
    let mut textos = Vec::with_capacity(itens.len());

    for (indice, item) in itens.into_iter().enumerate() {
        let texto = item.get("text").ok_or_else(|| ErroNormalizacao::ChaveAusente {
            campo: campo.to_string(),
            indice,
            chave: "text",
        })?;
        let texto = texto.as_str().ok_or_else(|| ErroNormalizacao::ChaveNaoETexto {
            campo: campo.to_string(),
            indice,
            chave: "text",
        })?;
        textos.push(texto);
    }

    Ok(textos.join(SEPARADOR))
}

fn juntar_socios(valor: &Value) -> Result<String, ErroNormalizacao> {
    let itens = itens_objeto("qsa", valor)?;
    let mut socios = Vec::with_capacity(itens.len());

    for (indice, item) in itens.into_iter().enumerate() {
        let nome = item.get("nome").ok_or(ErroNormalizacao::ChaveAusente {
            campo: "qsa".to_string(),
            indice,
            chave: "nome",
        })?;
        let qualificacao = item.get("qual").map(representacao_textual).unwrap_or_default();
        socios.push(format!("{} ({})", representacao_textual(nome), qualificacao));
    }

    Ok(socios.join(SEPARADOR))
}

fn itens_objeto<'a>(
    campo: &str,
    valor: &'a Value,
) -> Result<Vec<&'a Map<String, Value>>, ErroNormalizacao> {
    let lista = valor.as_array().ok_or_else(|| ErroNormalizacao::NaoELista {
        campo: campo.to_string(),
    })?;

    lista
        .iter()
        .enumerate()
        .map(|(indice, item)| {
            item.as_object().ok_or_else(|| ErroNormalizacao::ItemNaoEObjeto {
                campo: campo.to_string(),
                indice,
            })
        })
        .collect()
}

/// Texto puro para strings, vazio para nulo e JSON compacto para o resto.
pub fn representacao_textual(valor: &Value) -> String {
    match valor {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        outro => outro.to_string(),
    }
}
