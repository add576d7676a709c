use anyhow::Result;
use clap::Parser;
use cnpj_excel::export::ARQUIVO_PADRAO;
use cnpj_excel::pipeline::{self, Opcoes};
use cnpj_excel::ui;
use std::path::PathBuf;

const CNPJ_EXEMPLO: &str = "06947283000160";

#[derive(Parser)]
#[command(name = "cnpj-excel")]
#[command(about = "Consulta um CNPJ na ReceitaWS e salva os dados em planilha Excel", long_about = None)]
struct Cli {
    /// CNPJ a consultar (enviado como informado)
    #[arg(long, default_value = CNPJ_EXEMPLO)]
    cnpj: String,

    /// Arquivo Excel de saída (sobrescrito se existir)
    #[arg(short, long, default_value = ARQUIVO_PADRAO)]
    output: PathBuf,

    /// Valida formato e dígitos verificadores antes da consulta
    #[arg(long)]
    validar: bool,

    /// Modo silencioso (menos saída)
    #[arg(short, long)]
    quiet: bool,

    /// Modo verboso (mais detalhes)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ui::init(cli.quiet, cli.verbose);

    let opcoes = Opcoes {
        validar_cnpj: cli.validar,
        url_base: None,
    };

    pipeline::executar(&cli.cnpj, &cli.output, &opcoes).await?;

    Ok(())
}
