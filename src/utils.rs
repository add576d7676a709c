use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Cria o diretório onde o arquivo será gravado, se ainda não existir.
pub fn ensure_parent_dir(file_path: &Path) -> Result<()> {
    match file_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.exists() => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Falha ao criar diretório: {}", dir.display()))?;
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cria_diretorios_intermediarios() {
        let tmp = tempfile::tempdir().unwrap();
        let arquivo = tmp.path().join("a").join("b").join("saida.xlsx");
        ensure_parent_dir(&arquivo).unwrap();
        assert!(tmp.path().join("a").join("b").is_dir());
        assert!(!arquivo.exists());
    }

    #[test]
    fn caminho_sem_diretorio_e_aceito() {
        ensure_parent_dir(Path::new("dados_empresa.xlsx")).unwrap();
    }
}
