// src/shared/shared_structs.rs

use serde::Serialize;

/// Estrutura genérica para padronizar as respostas da API.
/// 'T' é o tipo do corpo da resposta, que pode ser opcional.
#[derive(Serialize)]
pub struct GenericResponse<T> {
    pub status: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")] // Não serializa 'body' se for None
    pub body: Option<T>,
}

impl GenericResponse<()> {
    /// Monta uma resposta de erro sem corpo.
    pub fn erro(message: &str) -> Self {
        GenericResponse {
            status: "error".to_string(),
            message: message.to_string(),
            body: None,
        }
    }
}

impl<T> GenericResponse<T> {
    /// Monta uma resposta de sucesso com corpo.
    pub fn sucesso(message: &str, body: T) -> Self {
        GenericResponse {
            status: "success".to_string(),
            message: message.to_string(),
            body: Some(body),
        }
    }
}
