//! Auth forms. These pages render without the site shell; the matching
//! `kih auth` commands perform the actions.

use serde::Serialize;

use crate::routes::LOGIN_PATH;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: &'static str,
    pub placeholder: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    pub label: &'static str,
    pub path: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthForm {
    pub heading: &'static str,
    pub fields: Vec<Field>,
    pub submit: &'static str,
    /// CLI equivalent of submitting the form.
    pub command: &'static str,
    pub links: Vec<Link>,
    pub google: bool,
}

const EMAIL: Field = Field {
    name: "email",
    label: "Email",
    kind: "email",
    placeholder: "email@example.com",
};

const PASSWORD: Field = Field {
    name: "password",
    label: "Password",
    kind: "password",
    placeholder: "********",
};

pub fn login_form() -> AuthForm {
    AuthForm {
        heading: "Login",
        fields: vec![EMAIL, PASSWORD],
        submit: "Login",
        command: "kih auth login <email>",
        links: vec![
            Link {
                label: "Lupa password?",
                path: "/auth/forgot-password",
            },
            Link {
                label: "Belum punya akun? Daftar",
                path: "/auth/register",
            },
        ],
        google: true,
    }
}

pub fn register_form() -> AuthForm {
    AuthForm {
        heading: "Daftar",
        fields: vec![
            Field {
                name: "name",
                label: "Nama",
                kind: "text",
                placeholder: "Nama lengkap",
            },
            EMAIL,
            PASSWORD,
        ],
        submit: "Daftar",
        command: "kih auth register <email> --name <name>",
        links: vec![Link {
            label: "Sudah punya akun? Login",
            path: LOGIN_PATH,
        }],
        google: true,
    }
}

pub fn forgot_password_form() -> AuthForm {
    AuthForm {
        heading: "Lupa Password",
        fields: vec![EMAIL],
        submit: "Kirim Link Reset",
        command: "kih auth forgot-password <email>",
        links: vec![Link {
            label: "Kembali ke Login",
            path: LOGIN_PATH,
        }],
        google: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::resolve;

    #[test]
    fn form_links_resolve_to_bare_routes() {
        for form in [login_form(), register_form(), forgot_password_form()] {
            for link in &form.links {
                let resolved = resolve(link.path).unwrap();
                assert_eq!(resolved.route.frame, crate::routes::Frame::Bare, "{}", link.path);
            }
        }
    }

    #[test]
    fn every_form_asks_for_email() {
        for form in [login_form(), register_form(), forgot_password_form()] {
            assert!(form.fields.iter().any(|f| f.name == "email"));
        }
    }
}
