// src/logic/mod.rs

// 画面やネットワークに依存しない純粋なルールたち
pub mod inventory;
pub mod progression;
pub mod reward;
