use anyhow::Result;
use chrono::Local;
use std::path::Path;
use crate::api::ClienteReceitaWs;
use crate::cnpj;
use crate::export;
use crate::models::ResultadoExportacao;
use crate::ui;

/// Opções da execução; o padrão reproduz a consulta sem validação.
#[derive(Debug, Clone, Default)]
pub struct Opcoes {
    /// Confere formato e dígitos verificadores antes de consultar.
    pub validar_cnpj: bool,
    /// Servidor alternativo no lugar da ReceitaWS.
    pub url_base: Option<String>,
}

/// Executa uma consulta completa: busca, achatamento e gravação.
pub async fn executar(cnpj: &str, caminho: &Path, opcoes: &Opcoes) -> Result<ResultadoExportacao> {
    ui::print_header("🔎 Consulta de CNPJ na ReceitaWS");
    ui::print_verbose(&format!("Hora de início: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    ui::print_info(&format!("CNPJ: {}", cnpj));
    ui::print_info(&format!("Arquivo de saída: {}", caminho.display()));

    let cnpj = if opcoes.validar_cnpj {
        let limpo = cnpj::validar(cnpj)?;
        ui::print_verbose(&format!("CNPJ validado: {}", limpo));
        limpo
    } else {
        cnpj.to_string()
    };

    let cliente = match &opcoes.url_base {
        Some(url) => ClienteReceitaWs::com_url_base(url),
        None => ClienteReceitaWs::new(),
    };

    ui::print_separator();
    ui::print_step(1, 2, "Consultando dados da empresa");
    let resultado = cliente.obter_dados_empresa(&cnpj).await;

    ui::print_step(2, 2, "Salvando planilha");
    let desfecho = export::salvar_dados_empresa(resultado, caminho)?;

    ui::print_verbose(&format!("Hora de término: {}", Local::now().format("%Y-%m-%d %H:%M:%S")));
    Ok(desfecho)
}
