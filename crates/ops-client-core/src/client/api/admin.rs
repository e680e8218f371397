mod permission;
mod quotation;
mod role;
mod user;
