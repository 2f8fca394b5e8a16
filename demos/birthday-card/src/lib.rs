use wasm_bindgen::prelude::*;
use morph_engine::*;

mod blow;
mod config;
mod events;
mod game;
mod letter;
mod palette;
mod scene;

use game::BirthdayCard;

morph_web::export_game!(BirthdayCard, "birthday-card");
