use serde_json::Value;
use crate::models::{ErroConsulta, RegistroEmpresa};
use crate::ui;

pub const URL_RECEITAWS: &str = "https://www.receitaws.com.br";

/// Cliente da API pública da ReceitaWS (`GET /v1/cnpj/{cnpj}`).
pub struct ClienteReceitaWs {
    url_base: String,
}

impl Default for ClienteReceitaWs {
    fn default() -> Self {
        Self::new()
    }
}

impl ClienteReceitaWs {
    pub fn new() -> Self {
        Self::com_url_base(URL_RECEITAWS)
    }

    /// Aponta o cliente para outro servidor (usado nos testes).
    pub fn com_url_base(url_base: &str) -> Self {
        Self {
            url_base: url_base.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_consulta(&self, cnpj: &str) -> String {
        // CNPJ entra no caminho exatamente como recebido
        format!("{}/v1/cnpj/{}", self.url_base, cnpj)
    }

    /// Faz uma única consulta e devolve o registro ou o erro já tratado.
    ///
    /// Nenhum erro escapa como pânico ou `anyhow::Error`: status diferente
    /// de 200, JSON inválido e falhas de conexão viram `ErroConsulta`.
    pub async fn obter_dados_empresa(&self, cnpj: &str) -> Result<RegistroEmpresa, ErroConsulta> {
        let url = self.url_consulta(cnpj);
        ui::print_verbose(&format!("GET {}", url));

        // Uma conexão por consulta, sem reaproveitamento
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ErroConsulta::Transporte(e.to_string()))?;

        let pb = ui::spinner("Consultando a ReceitaWS...");
        let resposta = client.get(&url).send().await;
        pb.finish_and_clear();

        let resposta = resposta.map_err(|e| ErroConsulta::Transporte(e.to_string()))?;
        let status = resposta.status().as_u16();
        ui::print_info(&format!("Status da Resposta HTTP: {}", status));

        if status != 200 {
            return Err(ErroConsulta::Status(status));
        }

        let corpo = resposta
            .bytes()
            .await
            .map_err(|e| ErroConsulta::Transporte(e.to_string()))?;

        let empresa = interpretar_resposta(status, &corpo)?;
        ui::print_info(&format!("Empresa decodificada: {}", Value::Object(empresa.clone())));
        Ok(empresa)
    }
}

/// Interpreta status e corpo da resposta sem tocar na rede.
pub fn interpretar_resposta(status: u16, corpo: &[u8]) -> Result<RegistroEmpresa, ErroConsulta> {
    if status != 200 {
        return Err(ErroConsulta::Status(status));
    }

    let texto = std::str::from_utf8(corpo).map_err(|e| {
        ui::print_error(&format!("Erro na decodificação do JSON: {}", e));
        ErroConsulta::Json
    })?;

    serde_json::from_str::<RegistroEmpresa>(texto).map_err(|e| {
        ui::print_error(&format!("Erro na decodificação do JSON: {}", e));
        ErroConsulta::Json
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn status_diferente_de_200_vira_erro_com_codigo() {
        for status in [201, 301, 404, 429, 500, 503] {
            // corpo invalido: nao deve nem ser olhado
            let erro = interpretar_resposta(status, b"{{{").unwrap_err();
            assert!(matches!(erro, ErroConsulta::Status(s) if s == status));
            assert!(erro.to_string().contains(&status.to_string()));
        }
    }

    #[test]
    fn json_malformado_tem_mensagem_fixa() {
        let erro = interpretar_resposta(200, b"<html>Too many requests</html>").unwrap_err();
        assert_eq!(erro.to_string(), "Erro na decodificação do JSON.");
    }

    #[test]
    fn utf8_invalido_conta_como_erro_de_json() {
        let erro = interpretar_resposta(200, &[0xff, 0xfe, b'{']).unwrap_err();
        assert!(matches!(erro, ErroConsulta::Json));
    }

    #[test]
    fn documento_que_nao_e_objeto_e_rejeitado() {
        let erro = interpretar_resposta(200, b"[1, 2, 3]").unwrap_err();
        assert!(matches!(erro, ErroConsulta::Json));
    }

    #[test]
    fn objeto_valido_volta_sem_alteracao() {
        let original = json!({
            "status": "OK",
            "nome": "EMPRESA EXEMPLO LTDA",
            "capital_social": 10000.5,
            "simples": {"optante": false, "data_opcao": null},
            "qsa": [{"nome": "Maria", "qual": "49-Sócio-Administrador"}]
        });
        let corpo = serde_json::to_vec(&original).unwrap();

        let registro = interpretar_resposta(200, &corpo).unwrap();
        assert_eq!(Value::Object(registro.clone()), original);

        let chaves: Vec<&str> = registro.keys().map(String::as_str).collect();
        assert_eq!(chaves, ["status", "nome", "capital_social", "simples", "qsa"]);
    }

    #[test]
    fn url_embute_cnpj_sem_alteracao() {
        let cliente = ClienteReceitaWs::com_url_base("http://127.0.0.1:9999/");
        assert_eq!(
            cliente.url_consulta("06.947.283/0001-60"),
            "http://127.0.0.1:9999/v1/cnpj/06.947.283/0001-60"
        );
        assert_eq!(
            ClienteReceitaWs::new().url_consulta("06947283000160"),
            "https://www.receitaws.com.br/v1/cnpj/06947283000160"
        );
    }
}
