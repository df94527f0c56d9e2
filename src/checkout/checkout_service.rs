// src/checkout/checkout_service.rs

use std::collections::HashMap;

use bigdecimal::BigDecimal;

use super::checkout_structs::{CheckoutConcluido, ItemSacola};
use crate::pedidos::pedidos_gateway::LivroPedidos;
use crate::pedidos::pedidos_structs::{ItemPedidoRascunho, PedidoRascunho, StatusPedido};
use crate::produtos::produtos_gateway::CatalogoGateway;
use crate::produtos::produtos_structs::Produto;
use crate::shared::erros::ErroCheckout;

/// Serviço que converte uma sacola validada em um pedido persistido com o
/// estoque abatido. Recebe na construção um valor que implementa os dois
/// gateways; toda a validação acontece antes de qualquer gravação.
pub struct ServicoCheckout<G> {
    gateways: G,
}

impl<G> ServicoCheckout<G>
where
    G: CatalogoGateway + LivroPedidos,
{
    pub fn new(gateways: G) -> Self {
        ServicoCheckout { gateways }
    }

    /// Devolve o escopo de gateways para o chamador confirmar ou desfazer.
    pub fn into_inner(self) -> G {
        self.gateways
    }

    /// Executa o checkout da sacola para o usuário já autenticado.
    ///
    /// Passos:
    /// 1. Valida a sacola (vazia, quantidades não positivas) e extrai os ids.
    /// 2. Busca todos os produtos referenciados em uma única consulta.
    /// 3. Confere o estoque da sacola inteira antes de qualquer mutação.
    /// 4. Calcula o total com o preço atual do catálogo.
    /// 5. Abate o estoque linha a linha e grava o registro completo.
    /// 6. Cria o pedido com status 'pendente' e obtém o id gerado.
    /// 7. Cria uma linha de item por item da sacola, com o preço capturado.
    pub async fn realizar(
        &mut self,
        itens: &[ItemSacola],
        usuario_id: i32,
    ) -> Result<CheckoutConcluido, ErroCheckout> {
        let ids = ids_da_sacola(itens)?;

        let produtos = self.gateways.buscar_por_ids(&ids).await?;
        let mut mapa: HashMap<i32, Produto> =
            produtos.into_iter().map(|p| (p.id, p)).collect();

        conferir_estoque(itens, &mapa)?;
        let total = calcular_total(itens, &mapa);

        // A partir daqui começam as gravações. O chamador mantém tudo em uma
        // única transação: qualquer erro abaixo desfaz o que já foi gravado.
        for item in itens {
            if let Some(produto) = mapa.get_mut(&item.produto_id) {
                produto.estoque -= item.quantidade;
                self.gateways.atualizar_estoque(produto).await?;
            }
        }

        // TODO: buscar o endereço cadastrado do usuário quando existir a
        // tabela de endereços.
        let pedido = PedidoRascunho {
            usuario_id,
            total: total.clone(),
            status: StatusPedido::Pendente,
            endereco: "endereço não informado".to_string(),
        };
        let pedido_id = self.gateways.criar_pedido(&pedido).await?;

        for item in itens {
            if let Some(produto) = mapa.get(&item.produto_id) {
                let linha = ItemPedidoRascunho {
                    pedido_id,
                    produto_id: produto.id,
                    quantidade: item.quantidade,
                    preco: produto.preco.clone(),
                };
                self.gateways.criar_item_pedido(&linha).await?;
            }
        }

        Ok(CheckoutConcluido { pedido_id, total })
    }
}

/// Valida a sacola e extrai o conjunto de ids de produto referenciados.
/// Linhas repetidas continuam sendo linhas independentes da sacola; aqui o
/// id entra uma única vez.
fn ids_da_sacola(itens: &[ItemSacola]) -> Result<Vec<i32>, ErroCheckout> {
    if itens.is_empty() {
        return Err(ErroCheckout::SacolaVazia);
    }

    let mut ids = Vec::with_capacity(itens.len());
    for item in itens {
        if item.quantidade <= 0 {
            return Err(ErroCheckout::QuantidadeInvalida {
                produto_id: item.produto_id,
            });
        }
        ids.push(item.produto_id);
    }

    // Ordena e remove repetidos: as linhas do FOR UPDATE são travadas sempre
    // na mesma sequência.
    ids.sort_unstable();
    ids.dedup();
    Ok(ids)
}

/// Confere se há estoque para todas as linhas antes de qualquer gravação.
/// Linhas repetidas do mesmo produto consomem o mesmo saldo acumulado, para
/// que a soma delas nunca ultrapasse o estoque disponível.
fn conferir_estoque(
    itens: &[ItemSacola],
    produtos: &HashMap<i32, Produto>,
) -> Result<(), ErroCheckout> {
    let mut saldo: HashMap<i32, i32> = HashMap::new();

    for item in itens {
        let produto = produtos
            .get(&item.produto_id)
            .ok_or(ErroCheckout::ProdutoNaoEncontrado {
                produto_id: item.produto_id,
            })?;

        let restante = saldo.entry(produto.id).or_insert(produto.estoque);
        if *restante < item.quantidade {
            return Err(ErroCheckout::EstoqueInsuficiente {
                produto_id: produto.id,
                nome: produto.nome.clone(),
            });
        }
        *restante -= item.quantidade;
    }

    Ok(())
}

/// Soma preço do catálogo vezes quantidade de cada linha, em BigDecimal.
/// O preço vem sempre do catálogo, nunca do cliente.
fn calcular_total(itens: &[ItemSacola], produtos: &HashMap<i32, Produto>) -> BigDecimal {
    let mut total = BigDecimal::from(0);

    for item in itens {
        if let Some(produto) = produtos.get(&item.produto_id) {
            let quantidade_bigdecimal = BigDecimal::from(item.quantidade);
            let subtotal = &produto.preco * &quantidade_bigdecimal;
            total += subtotal;
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::shared::erros::ErroGateway;

    /// Gateways em memória para exercitar o serviço sem banco.
    /// Guarda cada gravação recebida para as verificações dos testes.
    struct GatewaysMemoria {
        produtos: HashMap<i32, Produto>,
        estoques_gravados: Vec<Produto>,
        pedidos: Vec<PedidoRascunho>,
        itens: Vec<ItemPedidoRascunho>,
        consultas: usize,
        falhar_consulta: bool,
        falhar_itens: bool,
    }

    impl GatewaysMemoria {
        fn nova(produtos: Vec<Produto>) -> Self {
            GatewaysMemoria {
                produtos: produtos.into_iter().map(|p| (p.id, p)).collect(),
                estoques_gravados: Vec::new(),
                pedidos: Vec::new(),
                itens: Vec::new(),
                consultas: 0,
                falhar_consulta: false,
                falhar_itens: false,
            }
        }

        /// Estoque visível do produto: a última gravação, ou o original.
        fn estoque_atual(&self, produto_id: i32) -> i32 {
            self.estoques_gravados
                .iter()
                .rev()
                .find(|p| p.id == produto_id)
                .map(|p| p.estoque)
                .unwrap_or_else(|| self.produtos[&produto_id].estoque)
        }
    }

    #[async_trait]
    impl CatalogoGateway for GatewaysMemoria {
        async fn buscar_por_ids(&mut self, ids: &[i32]) -> Result<Vec<Produto>, ErroGateway> {
            self.consultas += 1;
            if self.falhar_consulta {
                return Err(ErroGateway::Consulta(sqlx::Error::PoolClosed));
            }
            Ok(ids
                .iter()
                .filter_map(|id| self.produtos.get(id).cloned())
                .collect())
        }

        async fn atualizar_estoque(&mut self, produto: &Produto) -> Result<(), ErroGateway> {
            self.estoques_gravados.push(produto.clone());
            Ok(())
        }
    }

    #[async_trait]
    impl LivroPedidos for GatewaysMemoria {
        async fn criar_pedido(&mut self, pedido: &PedidoRascunho) -> Result<i32, ErroGateway> {
            self.pedidos.push(pedido.clone());
            Ok(self.pedidos.len() as i32)
        }

        async fn criar_item_pedido(
            &mut self,
            item: &ItemPedidoRascunho,
        ) -> Result<(), ErroGateway> {
            if self.falhar_itens {
                return Err(ErroGateway::Gravacao(sqlx::Error::PoolClosed));
            }
            self.itens.push(item.clone());
            Ok(())
        }
    }

    fn produto(id: i32, preco: &str, estoque: i32) -> Produto {
        Produto {
            id,
            nome: format!("Produto {}", id),
            descricao: "descrição de teste".to_string(),
            imagem: "imagem.png".to_string(),
            preco: preco.parse().unwrap(),
            estoque,
            criado_em: chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
        }
    }

    fn item(produto_id: i32, quantidade: i32) -> ItemSacola {
        ItemSacola {
            produto_id,
            quantidade,
        }
    }

    #[test]
    fn ids_da_sacola_ordena_e_remove_repetidos() {
        let ids = ids_da_sacola(&[item(3, 1), item(1, 2), item(3, 1)]).unwrap();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn calcular_total_usa_o_preco_do_catalogo() {
        let mapa: HashMap<i32, Produto> = vec![produto(1, "10.00", 5), produto(2, "0.50", 9)]
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let total = calcular_total(&[item(1, 2), item(2, 4)], &mapa);
        assert_eq!(total, "22.00".parse::<BigDecimal>().unwrap());
    }

    #[actix_web::test]
    async fn sacola_vazia_falha_sem_tocar_os_gateways() {
        let mut servico = ServicoCheckout::new(GatewaysMemoria::nova(vec![]));

        let erro = servico.realizar(&[], 1).await.unwrap_err();

        assert!(matches!(erro, ErroCheckout::SacolaVazia));
        let gateways = servico.into_inner();
        assert_eq!(gateways.consultas, 0);
        assert!(gateways.pedidos.is_empty());
    }

    #[actix_web::test]
    async fn quantidade_nao_positiva_falha_antes_de_qualquer_consulta() {
        let mut servico =
            ServicoCheckout::new(GatewaysMemoria::nova(vec![produto(1, "10.00", 5)]));

        let erro = servico.realizar(&[item(1, 0)], 1).await.unwrap_err();

        assert!(matches!(
            erro,
            ErroCheckout::QuantidadeInvalida { produto_id: 1 }
        ));
        let gateways = servico.into_inner();
        assert_eq!(gateways.consultas, 0);
        assert!(gateways.estoques_gravados.is_empty());
    }

    #[actix_web::test]
    async fn produto_inexistente_rejeita_a_sacola_inteira() {
        let mut servico =
            ServicoCheckout::new(GatewaysMemoria::nova(vec![produto(1, "10.00", 5)]));

        let erro = servico
            .realizar(&[item(1, 1), item(99, 1)], 1)
            .await
            .unwrap_err();

        assert!(matches!(
            erro,
            ErroCheckout::ProdutoNaoEncontrado { produto_id: 99 }
        ));
        let gateways = servico.into_inner();
        assert!(gateways.estoques_gravados.is_empty());
        assert!(gateways.pedidos.is_empty());
        assert!(gateways.itens.is_empty());
    }

    #[actix_web::test]
    async fn estoque_insuficiente_nao_abate_nem_as_linhas_validas() {
        let mut servico = ServicoCheckout::new(GatewaysMemoria::nova(vec![
            produto(1, "10.00", 5),
            produto(2, "3.50", 1),
        ]));

        let erro = servico
            .realizar(&[item(1, 2), item(2, 10)], 7)
            .await
            .unwrap_err();

        assert!(matches!(
            erro,
            ErroCheckout::EstoqueInsuficiente { produto_id: 2, .. }
        ));
        let gateways = servico.into_inner();
        assert!(gateways.estoques_gravados.is_empty());
        assert!(gateways.pedidos.is_empty());
        assert_eq!(gateways.estoque_atual(1), 5);
    }

    #[actix_web::test]
    async fn checkout_com_sucesso_abate_estoque_e_cria_pedido() {
        // Sacola [{produto 1, qtd 2}] com preço 10.00 e estoque 5.
        let mut servico =
            ServicoCheckout::new(GatewaysMemoria::nova(vec![produto(1, "10.00", 5)]));

        let resultado = servico.realizar(&[item(1, 2)], 42).await.unwrap();

        assert_eq!(resultado.total, "20.00".parse::<BigDecimal>().unwrap());

        let gateways = servico.into_inner();
        assert_eq!(gateways.estoque_atual(1), 3);
        assert_eq!(gateways.pedidos.len(), 1);
        assert_eq!(gateways.pedidos[0].usuario_id, 42);
        assert_eq!(gateways.pedidos[0].status, StatusPedido::Pendente);
        assert_eq!(
            gateways.pedidos[0].total,
            "20.00".parse::<BigDecimal>().unwrap()
        );
        assert_eq!(gateways.itens.len(), 1);
        assert_eq!(gateways.itens[0].pedido_id, resultado.pedido_id);
        assert_eq!(gateways.itens[0].produto_id, 1);
        assert_eq!(gateways.itens[0].quantidade, 2);
        assert_eq!(
            gateways.itens[0].preco,
            "10.00".parse::<BigDecimal>().unwrap()
        );
    }

    #[actix_web::test]
    async fn sacola_pedindo_mais_que_o_estoque_nao_cria_pedido() {
        // Sacola [{produto 1, qtd 10}] com estoque 5.
        let mut servico =
            ServicoCheckout::new(GatewaysMemoria::nova(vec![produto(1, "10.00", 5)]));

        let erro = servico.realizar(&[item(1, 10)], 1).await.unwrap_err();

        assert!(matches!(erro, ErroCheckout::EstoqueInsuficiente { .. }));
        let gateways = servico.into_inner();
        assert_eq!(gateways.estoque_atual(1), 5);
        assert!(gateways.pedidos.is_empty());
    }

    #[actix_web::test]
    async fn linhas_repetidas_do_mesmo_produto_abatem_acumulado() {
        let mut servico =
            ServicoCheckout::new(GatewaysMemoria::nova(vec![produto(1, "5.00", 5)]));

        let resultado = servico.realizar(&[item(1, 2), item(1, 2)], 1).await.unwrap();

        assert_eq!(resultado.total, "20.00".parse::<BigDecimal>().unwrap());
        let gateways = servico.into_inner();
        assert_eq!(gateways.estoque_atual(1), 1);
        assert_eq!(gateways.itens.len(), 2);
    }

    #[actix_web::test]
    async fn linhas_repetidas_alem_do_estoque_sao_rejeitadas() {
        let mut servico =
            ServicoCheckout::new(GatewaysMemoria::nova(vec![produto(1, "5.00", 5)]));

        let erro = servico
            .realizar(&[item(1, 3), item(1, 3)], 1)
            .await
            .unwrap_err();

        assert!(matches!(
            erro,
            ErroCheckout::EstoqueInsuficiente { produto_id: 1, .. }
        ));
        let gateways = servico.into_inner();
        assert!(gateways.estoques_gravados.is_empty());
        assert_eq!(gateways.estoque_atual(1), 5);
    }

    #[actix_web::test]
    async fn falha_na_consulta_de_produtos_aparece_como_erro_de_gateway() {
        let mut gateways = GatewaysMemoria::nova(vec![produto(1, "10.00", 5)]);
        gateways.falhar_consulta = true;
        let mut servico = ServicoCheckout::new(gateways);

        let erro = servico.realizar(&[item(1, 1)], 1).await.unwrap_err();

        assert!(matches!(erro, ErroCheckout::Gateway(_)));
        let gateways = servico.into_inner();
        assert!(gateways.estoques_gravados.is_empty());
        assert!(gateways.pedidos.is_empty());
    }

    #[actix_web::test]
    async fn falha_ao_gravar_item_aparece_como_erro_de_gateway() {
        let mut gateways = GatewaysMemoria::nova(vec![produto(1, "10.00", 5)]);
        gateways.falhar_itens = true;
        let mut servico = ServicoCheckout::new(gateways);

        let erro = servico.realizar(&[item(1, 1)], 1).await.unwrap_err();

        assert!(matches!(erro, ErroCheckout::Gateway(_)));
    }

    #[actix_web::test]
    async fn consulta_repetida_devolve_os_mesmos_produtos() {
        // Idempotência do caminho de leitura, sem gravações no meio.
        let mut gateways =
            GatewaysMemoria::nova(vec![produto(1, "10.00", 5), produto(2, "1.00", 3)]);

        let primeira = gateways.buscar_por_ids(&[1, 2]).await.unwrap();
        let segunda = gateways.buscar_por_ids(&[1, 2]).await.unwrap();

        assert_eq!(primeira.len(), segunda.len());
        for (a, b) in primeira.iter().zip(segunda.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.estoque, b.estoque);
            assert_eq!(a.preco, b.preco);
        }
    }
}
