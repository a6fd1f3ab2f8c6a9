use category_core::{ApiError, CategoryClient, HttpTransport, RegisterRequest, SignUpForm};

use crate::notice::Notice;
use crate::screens::Route;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    pub notice: Notice,
    pub route: Route,
}

/// Validate the form and register. Success sends the user to sign in;
/// registering does not sign anyone in.
pub fn submit<T: HttpTransport + ?Sized>(
    client: &CategoryClient,
    transport: &T,
    form: &SignUpForm,
) -> SignUpOutcome {
    let register = match form.validate() {
        Ok(register) => register,
        Err(errors) => {
            return SignUpOutcome {
                notice: Notice::invalid_input(&errors),
                route: Route::SignUp,
            }
        }
    };

    match send(client, transport, &register) {
        Ok(()) => {
            tracing::info!(email = %register.email, "registered");
            SignUpOutcome {
                notice: Notice::registration_success(),
                route: Route::SignIn,
            }
        }
        Err(err) => {
            tracing::error!(error = %err, "registration failed");
            SignUpOutcome {
                notice: Notice::registration_failed(),
                route: Route::SignUp,
            }
        }
    }
}

fn send<T: HttpTransport + ?Sized>(
    client: &CategoryClient,
    transport: &T,
    register: &RegisterRequest,
) -> Result<(), ApiError> {
    let request = client.build_register(register)?;
    let response = transport.execute(&request)?;
    client.parse_register(response)
}
