mod helpers;

mod change_password;
mod login;
mod password_reset;
mod registration;
mod two_factor;
