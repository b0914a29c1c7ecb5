//! Prune two small snippets against a locally running service.
//!
//! Start the mock first: `PORT=8000 cargo run -p mock-server`.

use prune_core::{PruneClient, PruneError, DEFAULT_THRESHOLD};

const AUTH_CODE: &str = "
def authenticate_user(username, password):
    if verify_credentials(username, password):
        return create_session(username)
    return None

def create_session(username):
    session_id = generate_session_id()
    store_session(session_id, username)
    return session_id

def send_welcome_email(username):
    email = get_user_email(username)
    send_email(email, \"Welcome!\", \"Thanks for joining!\")
";

const PAYMENT_CODE: &str = "
def process_payment(amount, card_info):
    if validate_card(card_info):
        if charge_card(card_info, amount):
            send_receipt(card_info['email'])
            return True
    return False

def validate_card(card_info):
    return len(card_info['number']) == 16

def generate_report():
    pass
";

fn show(label: &str, outcome: Result<prune_core::PruneResult, PruneError>) {
    println!("== {label}");
    match outcome {
        Ok(result) => {
            println!("score: {:.1}%", result.score * 100.0);
            println!("reduction: {:.1}%", result.reduction_rate);
            println!("{}\n", result.pruned_code);
        }
        Err(e) => println!("error: {e}\n"),
    }
}

fn main() {
    let client = PruneClient::default();

    show(
        "authentication",
        client.prune(AUTH_CODE, "focus on authentication and session management", DEFAULT_THRESHOLD),
    );
    show(
        "payment",
        client.prune(PAYMENT_CODE, "payment validation and charging", 0.8),
    );
    show("empty code", client.prune("", "test", DEFAULT_THRESHOLD));
}
