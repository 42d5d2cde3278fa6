//! Interactive shell for the product catalog.
//!
//! # Responsibility
//! - Collect raw input, construct validated `Produto` values and invoke the
//!   repository operations.
//! - Render results as text; a single failed operation never ends the loop.

use catalogo_core::{
    default_log_level, init_logging, Produto, ProdutoRepository, ProdutoValidationError,
    RepoError, SqliteProdutoRepo, DEFAULT_DB_PATH,
};
use std::io::{self, BufRead, Write};
use std::str::FromStr;

fn main() {
    if let Err(err) = setup_logging() {
        eprintln!("Aviso: logging desativado: {err}");
    }

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DB_PATH.to_string());

    let repo = match SqliteProdutoRepo::open(&db_path) {
        Ok(repo) => repo,
        Err(err) => {
            eprintln!("Erro ao abrir o banco de dados `{db_path}`: {err}");
            std::process::exit(1);
        }
    };
    log::info!("event=app_start module=cli status=ok db_path={db_path}");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_menu(&repo, &mut input);
}

fn setup_logging() -> Result<(), String> {
    let cwd = std::env::current_dir()
        .map_err(|err| format!("working directory unavailable: {err}"))?;
    let log_dir = cwd.join("logs");
    init_logging(default_log_level(), &log_dir.to_string_lossy())
}

fn run_menu(repo: &impl ProdutoRepository, input: &mut impl BufRead) {
    loop {
        exibir_menu();
        let Some(opcao) = ler_linha(input, "Escolha uma opção: ") else {
            break;
        };
        match opcao.to_lowercase().as_str() {
            "a" => cadastrar_produto(repo, input),
            "b" => listar_produtos(repo),
            "c" => alterar_produto(repo, input),
            "d" => excluir_produto(repo, input),
            "e" => {
                println!("Saindo do programa.");
                break;
            }
            _ => println!("Opção inválida. Tente novamente."),
        }
    }
}

fn exibir_menu() {
    println!("\nMenu de Gerenciamento de Produtos");
    println!("a) Cadastrar Produto");
    println!("b) Listar Produtos");
    println!("c) Alterar Produto");
    println!("d) Excluir Produto");
    println!("e) Sair");
}

fn cadastrar_produto(repo: &impl ProdutoRepository, input: &mut impl BufRead) {
    println!("\nCadastro de Novo Produto");
    let Some(nome) = ler_linha(input, "Nome: ") else {
        return;
    };
    let Some(preco) = ler_numero::<f64>(input, "Preço: ", "um número real") else {
        return;
    };
    let Some(estoque) = ler_numero::<i64>(input, "Estoque: ", "um número inteiro") else {
        return;
    };

    match Produto::new(nome, preco, estoque) {
        Ok(produto) => match repo.add(&produto) {
            Ok(id) => println!("Produto cadastrado com sucesso! ID: {id}"),
            Err(err) => exibir_erro_store(&err),
        },
        Err(err) => exibir_erro_validacao(&err),
    }
}

fn listar_produtos(repo: &impl ProdutoRepository) {
    match repo.get_all() {
        Ok(produtos) if produtos.is_empty() => println!("Nenhum produto cadastrado."),
        Ok(produtos) => print!("{}", formatar_tabela(&produtos)),
        Err(err) => exibir_erro_store(&err),
    }
}

fn alterar_produto(repo: &impl ProdutoRepository, input: &mut impl BufRead) {
    println!("\nAlteração de Produto");
    let Some(id) = ler_numero::<i64>(
        input,
        "ID do produto a ser alterado: ",
        "um número inteiro",
    ) else {
        return;
    };

    let atual = match repo.get(id) {
        Ok(Some(produto)) => produto,
        Ok(None) => {
            println!("Produto não encontrado.");
            return;
        }
        Err(err) => {
            exibir_erro_store(&err);
            return;
        }
    };

    println!(
        "Produto atual: Nome: {}, Preço: {}, Estoque: {}",
        atual.nome, atual.preco, atual.estoque
    );

    // Blank input keeps the current value; any non-empty input is taken
    // literally, so zero estoque or a re-typed equal value stay expressible.
    let Some(nome) = ler_linha(input, "Novo Nome (deixe em branco para manter o atual): ")
    else {
        return;
    };
    let nome = if nome.is_empty() { atual.nome.clone() } else { nome };

    let Some(preco) = ler_numero_opcional::<f64>(
        input,
        "Novo Preço (deixe em branco para manter o atual): ",
        "um número real",
    ) else {
        return;
    };
    let preco = preco.unwrap_or(atual.preco);

    let Some(estoque) = ler_numero_opcional::<i64>(
        input,
        "Novo Estoque (deixe em branco para manter o atual): ",
        "um número inteiro",
    ) else {
        return;
    };
    let estoque = estoque.unwrap_or(atual.estoque);

    match Produto::with_id(id, nome, preco, estoque) {
        Ok(produto) => match repo.update(&produto) {
            Ok(true) => println!("Produto atualizado com sucesso."),
            Ok(false) => println!("Falha ao atualizar o produto."),
            Err(err) => exibir_erro_store(&err),
        },
        Err(err) => exibir_erro_validacao(&err),
    }
}

fn excluir_produto(repo: &impl ProdutoRepository, input: &mut impl BufRead) {
    println!("\nExclusão de Produto");
    let Some(id) = ler_numero::<i64>(
        input,
        "ID do produto a ser excluído: ",
        "um número inteiro",
    ) else {
        return;
    };

    match repo.delete(id) {
        Ok(true) => println!("Produto excluído com sucesso."),
        Ok(false) => println!("Produto não encontrado."),
        Err(err) => exibir_erro_store(&err),
    }
}

fn exibir_erro_validacao(err: &ProdutoValidationError) {
    println!("Erro de validação:");
    for violation in &err.violations {
        println!("- {violation}");
    }
}

fn exibir_erro_store(err: &RepoError) {
    log::error!("event=store_op module=cli status=error error={err}");
    println!("Erro ao acessar o banco de dados: {err}");
}

/// Reads one line after showing a prompt, trimmed.
///
/// Returns `None` when input ends or cannot be read.
fn ler_linha(input: &mut impl BufRead, prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut linha = String::new();
    match input.read_line(&mut linha) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(linha.trim().to_string()),
    }
}

/// Reads a numeric value, re-requesting until the input parses.
fn ler_numero<T: FromStr>(input: &mut impl BufRead, prompt: &str, tipo: &str) -> Option<T> {
    loop {
        let linha = ler_linha(input, prompt)?;
        match linha.parse::<T>() {
            Ok(valor) => return Some(valor),
            Err(_) => println!("Entrada inválida. Por favor, insira {tipo}."),
        }
    }
}

/// Reads a numeric value where blank input means "keep the current value".
///
/// Returns `Some(None)` on blank input and re-requests on parse failure, so
/// "not provided" is never conflated with a falsy value.
fn ler_numero_opcional<T: FromStr>(
    input: &mut impl BufRead,
    prompt: &str,
    tipo: &str,
) -> Option<Option<T>> {
    loop {
        let linha = ler_linha(input, prompt)?;
        if linha.is_empty() {
            return Some(None);
        }
        match linha.parse::<T>() {
            Ok(valor) => return Some(Some(valor)),
            Err(_) => println!("Entrada inválida. Por favor, insira {tipo}."),
        }
    }
}

fn formatar_tabela(produtos: &[Produto]) -> String {
    let linhas: Vec<[String; 4]> = produtos
        .iter()
        .map(|produto| {
            [
                produto.id.map_or_else(|| "-".to_string(), |id| id.to_string()),
                produto.nome.clone(),
                format!("R$ {:.2}", produto.preco),
                produto.estoque.to_string(),
            ]
        })
        .collect();

    let cabecalhos = ["ID", "Nome", "Preço", "Estoque"];
    let mut larguras = cabecalhos.map(|titulo| titulo.chars().count());
    for linha in &linhas {
        for (largura, celula) in larguras.iter_mut().zip(linha.iter()) {
            *largura = (*largura).max(celula.chars().count());
        }
    }

    let mut saida = String::new();
    saida.push_str(&format!(
        "{:<id$}  {:<nome$}  {:>preco$}  {:>estoque$}\n",
        cabecalhos[0],
        cabecalhos[1],
        cabecalhos[2],
        cabecalhos[3],
        id = larguras[0],
        nome = larguras[1],
        preco = larguras[2],
        estoque = larguras[3],
    ));
    saida.push_str(&"-".repeat(larguras.iter().sum::<usize>() + 6));
    saida.push('\n');

    for linha in &linhas {
        saida.push_str(&format!(
            "{:<id$}  {:<nome$}  {:>preco$}  {:>estoque$}\n",
            linha[0],
            linha[1],
            linha[2],
            linha[3],
            id = larguras[0],
            nome = larguras[1],
            preco = larguras[2],
            estoque = larguras[3],
        ));
    }

    saida
}
