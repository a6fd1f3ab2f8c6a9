use category_core::{
    ApiError, CategoryClient, HttpTransport, LoginData, LoginRequest, SessionContext,
    SessionStore, SignInForm,
};

use crate::notice::Notice;
use crate::screens::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInOutcome {
    pub notice: Notice,
    pub route: Route,
}

/// Validate the form, log in, and store the returned token.
pub fn submit<T, S>(
    client: &CategoryClient,
    transport: &T,
    session: &mut SessionContext<S>,
    form: &SignInForm,
) -> SignInOutcome
where
    T: HttpTransport + ?Sized,
    S: SessionStore,
{
    let login = match form.validate() {
        Ok(login) => login,
        Err(errors) => {
            return SignInOutcome {
                notice: Notice::invalid_input(&errors),
                route: Route::SignIn,
            }
        }
    };

    let result = request_token(client, transport, &login)
        .and_then(|data| session.sign_in(&data.token).map_err(ApiError::from));
    match result {
        Ok(_) => {
            tracing::info!(email = %login.email, "signed in");
            SignInOutcome {
                notice: Notice::login_success(),
                route: Route::MainMenu,
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "sign in failed");
            SignInOutcome {
                notice: Notice::login_failed(),
                route: Route::SignIn,
            }
        }
    }
}

fn request_token<T: HttpTransport + ?Sized>(
    client: &CategoryClient,
    transport: &T,
    login: &LoginRequest,
) -> Result<LoginData, ApiError> {
    let request = client.build_login(login)?;
    let response = transport.execute(&request)?;
    client.parse_login(response)
}

#[cfg(test)]
mod tests {
    use category_core::{HttpMethod, MemorySessionStore};

    use super::*;
    use crate::screens::scripted::Scripted;

    fn form(email: &str, password: &str) -> SignInForm {
        SignInForm {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn successful_login_stores_token_and_opens_menu() {
        let client = CategoryClient::new("http://api.test");
        let transport = Scripted::default().reply(200, r#"{"data":{"token":"T"}}"#);
        let mut session = SessionContext::new(MemorySessionStore::default());

        let outcome = submit(&client, &transport, &mut session, &form("a@b.com", "x"));

        assert_eq!(outcome.route, Route::MainMenu);
        assert_eq!(outcome.notice, Notice::login_success());
        assert_eq!(session.current().unwrap().unwrap().token(), "T");

        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].method, HttpMethod::Post);
        assert_eq!(seen[0].path, "http://api.test/api/user/login");
        assert_eq!(seen[0].header("authorization"), None);
    }

    #[test]
    fn rejected_login_stays_on_sign_in() {
        let client = CategoryClient::new("http://api.test");
        let transport = Scripted::default().reply(401, r#"{"errors":"invalid email or password"}"#);
        let mut session = SessionContext::new(MemorySessionStore::default());

        let outcome = submit(&client, &transport, &mut session, &form("a@b.com", "bad"));

        assert_eq!(outcome.route, Route::SignIn);
        assert_eq!(outcome.notice, Notice::login_failed());
        assert!(session.current().unwrap().is_none());
    }

    #[test]
    fn blank_token_in_a_2xx_reply_is_a_failed_login() {
        let client = CategoryClient::new("http://api.test");
        let mut session = SessionContext::new(MemorySessionStore::default());

        for body in [r#"{"data":{"token":""}}"#, r#"{"data":{"token":"  "}}"#] {
            let transport = Scripted::default().reply(200, body);
            let outcome = submit(&client, &transport, &mut session, &form("a@b.com", "x"));

            assert_eq!(outcome.route, Route::SignIn);
            assert_eq!(outcome.notice, Notice::login_failed());
            assert!(session.current().unwrap().is_none());
        }
    }

    #[test]
    fn transport_failure_is_reported_like_any_other() {
        let client = CategoryClient::new("http://api.test");
        let transport = Scripted::default().fail();
        let mut session = SessionContext::new(MemorySessionStore::default());

        let outcome = submit(&client, &transport, &mut session, &form("a@b.com", "x"));
        assert_eq!(outcome.notice, Notice::login_failed());
    }

    #[test]
    fn invalid_form_sends_nothing() {
        let client = CategoryClient::new("http://api.test");
        let transport = Scripted::default();
        let mut session = SessionContext::new(MemorySessionStore::default());

        let outcome = submit(&client, &transport, &mut session, &form("nope", ""));

        assert_eq!(outcome.route, Route::SignIn);
        assert_eq!(outcome.notice.text, "Invalid email\nPassword is required");
        assert!(transport.seen.borrow().is_empty());
    }
}
