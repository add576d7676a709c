use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ErroCnpj {
    #[error("CNPJ deve ter 14 dígitos (recebido: '{0}')")]
    Tamanho(String),

    #[error("CNPJ com dígitos verificadores inválidos: {0}")]
    DigitoVerificador(String),
}

/// Remove a pontuação usual (`00.000.000/0000-00`) e espaços.
pub fn normalizar(cnpj: &str) -> String {
    cnpj.chars()
        .filter(|c| !matches!(c, '.' | '/' | '-') && !c.is_whitespace())
        .collect()
}

/// Normaliza e confere tamanho e dígitos verificadores.
pub fn validar(cnpj: &str) -> Result<String, ErroCnpj> {
    let limpo = normalizar(cnpj);

    if limpo.len() != 14 || !limpo.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErroCnpj::Tamanho(limpo));
    }

    let digitos: Vec<u32> = limpo.bytes().map(|b| u32::from(b - b'0')).collect();
    let dv1 = digito_verificador(&digitos[..12]);
    let dv2 = digito_verificador(&digitos[..13]);

    if digitos[12] != dv1 || digitos[13] != dv2 {
        return Err(ErroCnpj::DigitoVerificador(limpo));
    }

    Ok(limpo)
}

// Pesos 2..9 da direita para a esquerda, reiniciando em 2
fn digito_verificador(base: &[u32]) -> u32 {
    let soma: u32 = base
        .iter()
        .rev()
        .enumerate()
        .map(|(i, d)| d * (2 + (i as u32 % 8)))
        .sum();
    match soma % 11 {
        0 | 1 => 0,
        resto => 11 - resto,
    }
}
