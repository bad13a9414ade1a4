// src/cli.rs

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ativiza-admin")]
#[command(about = "Painel administrativo Ativiza pela linha de comando")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Autentica e guarda a sessão
    Login {
        #[arg(long)]
        email: String,

        #[arg(long, env = "ATIVIZA_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Encerra a sessão (local e no servidor)
    Logout,

    /// Mostra o usuário autenticado
    Me,

    /// Pede o email de redefinição de senha
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Redefine a senha com o token recebido por email
    ResetPassword {
        #[arg(long)]
        token: String,

        #[arg(long)]
        password: String,
    },

    /// Contas
    Accounts {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Usuários da plataforma
    PlatformUsers {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Features (com traduções e preços)
    Features {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Módulos
    Modules {
        #[command(subcommand)]
        action: ResourceAction,
    },

    /// Planos
    Plans {
        #[command(subcommand)]
        action: PlanAction,
    },

    /// Qualificações
    Qualifications {
        #[command(subcommand)]
        action: ResourceAction,
    },
}

impl Command {
    /// Comandos que funcionam sem sessão.
    pub fn is_public(&self) -> bool {
        matches!(
            self,
            Command::Login { .. } | Command::ForgotPassword { .. } | Command::ResetPassword { .. }
        )
    }
}

#[derive(Debug, Subcommand)]
pub enum ResourceAction {
    /// Lista paginada
    List(ListArgs),

    /// Mostra um registro
    Get { id: String },

    /// Cria a partir de um arquivo JSON
    Create(PayloadArgs),

    /// Atualiza a partir de um arquivo JSON
    Update {
        id: String,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Exclui (pede confirmação, a não ser com --yes)
    Delete {
        id: String,

        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub page: Option<u32>,

    #[arg(long)]
    pub limit: Option<u32>,

    /// Texto de busca
    #[arg(long)]
    pub q: Option<String>,
}

#[derive(Debug, Args)]
pub struct PayloadArgs {
    /// Arquivo JSON com o payload
    #[arg(long)]
    pub file: PathBuf,

    /// Tradução extra, `LOCALE=TEXTO` (ou só `TEXTO` para o próximo idioma livre)
    #[arg(long = "translation")]
    pub translations: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub enum PlanAction {
    #[command(flatten)]
    Crud(ResourceAction),

    /// Resumo do plano: features por módulo e totais por moeda
    Summary { id: i64 },

    /// Liga/desliga features (ou módulos inteiros) de um plano
    Toggle {
        id: i64,

        #[arg(long = "feature")]
        features: Vec<i64>,

        #[arg(long = "module")]
        modules: Vec<i64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plan_toggle_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "ativiza-admin", "plans", "toggle", "4", "--feature", "1", "--feature", "2", "--module", "9",
        ])
        .unwrap();

        match cli.command {
            Command::Plans {
                action: PlanAction::Toggle { id, features, modules },
            } => {
                assert_eq!(id, 4);
                assert_eq!(features, vec![1, 2]);
                assert_eq!(modules, vec![9]);
            }
            other => panic!("comando inesperado: {:?}", other),
        }
    }

    #[test]
    fn plans_accept_the_common_crud_actions() {
        let cli = Cli::try_parse_from(["ativiza-admin", "plans", "delete", "3", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Plans {
                action: PlanAction::Crud(ResourceAction::Delete { yes: true, .. })
            }
        ));
    }

    #[test]
    fn only_auth_entry_points_are_public() {
        let login = Cli::try_parse_from(["ativiza-admin", "login", "--email", "a@b.com", "--password", "123456"]).unwrap();
        assert!(login.command.is_public());

        let list = Cli::try_parse_from(["ativiza-admin", "features", "list", "--q", "crm"]).unwrap();
        assert!(!list.command.is_public());
    }
}
