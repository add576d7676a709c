use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use serde_json::Value;
use std::path::Path;
use crate::models::{tem_status_erro, ErroConsulta, RegistroEmpresa, ResultadoExportacao};
use crate::normalize;
use crate::ui;
use crate::utils;

pub const ARQUIVO_PADRAO: &str = "dados_empresa.xlsx";

const SEM_MENSAGEM: &str = "sem mensagem";

/// Máximo de caracteres aceito numa célula do Excel.
const LIMITE_CELULA: usize = 32_767;

/// Salva o registro da empresa numa planilha de uma linha.
///
/// Só grava quando a consulta deu certo, o registro não está vazio e o
/// campo `status` (se houver) não é `"ERROR"`. Caso contrário avisa no
/// console e não toca no arquivo. Erros de estrutura no achatamento e de
/// gravação sobem para quem chamou.
pub fn salvar_dados_empresa(
    resultado: Result<RegistroEmpresa, ErroConsulta>,
    caminho: &Path,
) -> Result<ResultadoExportacao> {
    let mut registro = match resultado {
        Ok(registro) if !registro.is_empty() && !tem_status_erro(&registro) => registro,
        Ok(registro) => return Ok(ignorar(mensagem_do_registro(&registro))),
        Err(erro) => return Ok(ignorar(erro.to_string())),
    };

    normalize::achatar_campos(&mut registro)
        .context("Dados da empresa com estrutura inesperada")?;

    escrever_planilha(&registro, caminho)?;

    ui::print_success(&format!(
        "Dados da empresa salvos com sucesso no arquivo {}",
        caminho.display()
    ));
    Ok(ResultadoExportacao::Salvo(caminho.to_path_buf()))
}

fn ignorar(mensagem: String) -> ResultadoExportacao {
    ui::print_warning(&format!(
        "Não há dados válidos para salvar. Mensagem de erro: {}",
        mensagem
    ));
    ResultadoExportacao::Ignorado { mensagem }
}

fn mensagem_do_registro(registro: &RegistroEmpresa) -> String {
    registro
        .get("message")
        .map(normalize::representacao_textual)
        .unwrap_or_else(|| SEM_MENSAGEM.to_string())
}

/// Uma linha de cabeçalho com as chaves e uma linha com os valores.
fn escrever_planilha(registro: &RegistroEmpresa, caminho: &Path) -> Result<()> {
    utils::ensure_parent_dir(caminho)?;

    let mut workbook = Workbook::new();
    let negrito = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (coluna, (chave, valor)) in registro.iter().enumerate() {
        let coluna = u16::try_from(coluna)
            .with_context(|| format!("Registro com colunas demais ({})", registro.len()))?;
        worksheet
            .write_string_with_format(0, coluna, chave, &negrito)
            .with_context(|| format!("Falha ao escrever cabeçalho '{}'", chave))?;
        escrever_celula(worksheet, 1, coluna, chave, valor)
            .with_context(|| format!("Falha ao escrever valor da coluna '{}'", chave))?;
    }

    workbook
        .save(caminho)
        .with_context(|| format!("Falha ao salvar planilha: {}", caminho.display()))?;

    ui::print_verbose(&format!("{} coluna(s) gravada(s)", registro.len()));
    Ok(())
}

fn escrever_celula(
    worksheet: &mut Worksheet,
    linha: u32,
    coluna: u16,
    chave: &str,
    valor: &Value,
) -> Result<()> {
    match valor {
        // Nulo fica como célula vazia
        Value::Null => {}
        Value::Bool(b) => {
            worksheet.write_boolean(linha, coluna, *b)?;
        }
        Value::Number(n) => {
            worksheet.write_number(linha, coluna, n.as_f64().unwrap_or_default())?;
        }
        Value::String(s) => {
            worksheet.write_string(linha, coluna, limitar_texto(chave, s))?;
        }
        Value::Array(_) | Value::Object(_) => {
            worksheet.write_string(linha, coluna, limitar_texto(chave, &valor.to_string()))?;
        }
    }
    Ok(())
}

/// Corta o texto no limite de caracteres de uma célula do Excel.
fn limitar_texto<'a>(chave: &str, texto: &'a str) -> &'a str {
    match texto.char_indices().nth(LIMITE_CELULA) {
        Some((corte, _)) => {
            ui::print_warning(&format!(
                "Coluna '{}' truncada em {} caracteres (limite do Excel)",
                chave, LIMITE_CELULA
            ));
            &texto[..corte]
        }
        None => texto,
    }
}
