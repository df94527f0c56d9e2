// src/shared/erros.rs

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use super::shared_structs::GenericResponse;

/// Falhas do armazenamento (Postgres) vistas pelos gateways de catálogo e
/// de pedidos. Leitura e gravação são variantes separadas para o log e para
/// o mapeamento HTTP.
#[derive(Debug, Error)]
pub enum ErroGateway {
    #[error("falha ao consultar o banco de dados: {0}")]
    Consulta(#[source] sqlx::Error),

    #[error("falha ao gravar no banco de dados: {0}")]
    Gravacao(#[source] sqlx::Error),
}

/// Erros do fluxo de checkout.
///
/// As variantes de validação e de regra de negócio são corrigíveis pelo
/// cliente e viram 400/409; 'Gateway' cobre falhas do armazenamento e vira
/// 500 com mensagem genérica, sem expor o detalhe do banco.
#[derive(Debug, Error)]
pub enum ErroCheckout {
    #[error("a sacola está vazia")]
    SacolaVazia,

    #[error("quantidade inválida para o produto {produto_id}")]
    QuantidadeInvalida { produto_id: i32 },

    #[error("produto {produto_id} não encontrado")]
    ProdutoNaoEncontrado { produto_id: i32 },

    #[error("estoque insuficiente para o produto {nome} (id {produto_id})")]
    EstoqueInsuficiente { produto_id: i32, nome: String },

    #[error(transparent)]
    Gateway(#[from] ErroGateway),
}

impl ResponseError for ErroCheckout {
    fn status_code(&self) -> StatusCode {
        match self {
            ErroCheckout::SacolaVazia
            | ErroCheckout::QuantidadeInvalida { .. }
            | ErroCheckout::ProdutoNaoEncontrado { .. } => StatusCode::BAD_REQUEST,
            ErroCheckout::EstoqueInsuficiente { .. } => StatusCode::CONFLICT,
            ErroCheckout::Gateway(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mensagem = match self {
            // O detalhe da falha de banco fica apenas no log do servidor.
            ErroCheckout::Gateway(erro) => {
                log::error!("Falha de armazenamento no checkout: {:?}", erro);
                "Erro interno ao processar o checkout.".to_string()
            }
            outro => outro.to_string(),
        };

        HttpResponse::build(self.status_code()).json(GenericResponse::<()>::erro(&mensagem))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn erros_de_validacao_viram_400() {
        assert_eq!(ErroCheckout::SacolaVazia.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErroCheckout::QuantidadeInvalida { produto_id: 1 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ErroCheckout::ProdutoNaoEncontrado { produto_id: 9 }.status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn estoque_insuficiente_vira_409() {
        let erro = ErroCheckout::EstoqueInsuficiente {
            produto_id: 3,
            nome: "Vela aromática".to_string(),
        };
        assert_eq!(erro.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn falha_de_armazenamento_vira_500() {
        let erro = ErroCheckout::Gateway(ErroGateway::Gravacao(sqlx::Error::PoolClosed));
        assert_eq!(erro.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn mensagem_de_gateway_nao_vaza_o_detalhe_do_banco() {
        let erro = ErroCheckout::Gateway(ErroGateway::Consulta(sqlx::Error::PoolClosed));
        let resposta = erro.error_response();
        assert_eq!(resposta.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
