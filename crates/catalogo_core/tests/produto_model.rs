use catalogo_core::{FieldViolation, Produto, NOME_MAX_CHARS};

#[test]
fn new_sets_no_id() {
    let produto = Produto::new("Mouse", 49.90, 10).unwrap();

    assert_eq!(produto.id, None);
    assert_eq!(produto.nome, "Mouse");
    assert_eq!(produto.preco, 49.90);
    assert_eq!(produto.estoque, 10);
}

#[test]
fn with_id_carries_the_identifier() {
    let produto = Produto::with_id(7, "Teclado", 120.0, 3).unwrap();

    assert_eq!(produto.id, Some(7));
}

#[test]
fn zero_estoque_is_valid() {
    let produto = Produto::new("Cabo HDMI", 19.90, 0).unwrap();

    assert_eq!(produto.estoque, 0);
}

#[test]
fn nome_at_limit_is_valid() {
    let nome = "a".repeat(NOME_MAX_CHARS);
    let produto = Produto::new(nome.clone(), 1.0, 1).unwrap();

    assert_eq!(produto.nome, nome);
}

#[test]
fn blank_nome_is_rejected() {
    let err = Produto::new("   ", 10.0, 1).unwrap_err();

    assert_eq!(err.violations, vec![FieldViolation::BlankNome]);
}

#[test]
fn over_long_nome_is_rejected() {
    let err = Produto::new("a".repeat(NOME_MAX_CHARS + 1), 10.0, 1).unwrap_err();

    assert_eq!(
        err.violations,
        vec![FieldViolation::NomeTooLong {
            chars: NOME_MAX_CHARS + 1
        }]
    );
}

#[test]
fn non_positive_preco_is_rejected() {
    let err = Produto::new("Mouse", 0.0, 1).unwrap_err();

    assert_eq!(
        err.violations,
        vec![FieldViolation::NonPositivePreco { preco: 0.0 }]
    );
}

#[test]
fn nan_preco_is_rejected() {
    let err = Produto::new("Mouse", f64::NAN, 1).unwrap_err();

    assert_eq!(err.violations.len(), 1);
    assert!(matches!(
        err.violations[0],
        FieldViolation::NonPositivePreco { .. }
    ));
}

#[test]
fn negative_estoque_is_rejected() {
    let err = Produto::new("Mouse", 10.0, -1).unwrap_err();

    assert_eq!(
        err.violations,
        vec![FieldViolation::NegativeEstoque { estoque: -1 }]
    );
}

#[test]
fn non_positive_id_is_rejected() {
    let err = Produto::with_id(0, "Mouse", 10.0, 1).unwrap_err();

    assert_eq!(err.violations, vec![FieldViolation::NonPositiveId { id: 0 }]);
}

#[test]
fn every_broken_rule_is_reported_at_once() {
    let err = Produto::new("", -5.0, -1).unwrap_err();

    assert_eq!(
        err.violations,
        vec![
            FieldViolation::BlankNome,
            FieldViolation::NonPositivePreco { preco: -5.0 },
            FieldViolation::NegativeEstoque { estoque: -1 },
        ]
    );
}

#[test]
fn violations_render_the_rule_messages() {
    let err = Produto::with_id(-2, "", -5.0, -1).unwrap_err();
    let rendered = err.to_string();

    assert!(rendered.contains("O id do produto não pode ser negativo ou zero."));
    assert!(rendered.contains("O nome do produto não pode ser vazio."));
    assert!(rendered.contains("O preço deve ser maior que zero."));
    assert!(rendered.contains("O estoque não pode ser negativo."));
}

#[test]
fn produto_serialization_uses_expected_wire_fields() {
    let produto = Produto::with_id(1, "Mouse", 49.90, 10).unwrap();

    let json = serde_json::to_value(&produto).unwrap();
    assert_eq!(json["id"], 1);
    assert_eq!(json["nome"], "Mouse");
    assert_eq!(json["preco"], 49.90);
    assert_eq!(json["estoque"], 10);

    let decoded: Produto = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, produto);
}
