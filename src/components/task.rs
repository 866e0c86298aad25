// src/components/task.rs

use serde::{Deserialize, Serialize};

/// タスクのカテゴリ。JSON 上の名前はバックエンドに合わせてあるよ。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TaskCategory {
    #[default]
    Productividad,
    #[serde(rename = "Alimentación")]
    Alimentacion,
    Ejercicio,
    SaludMental,
}

pub const ALL_CATEGORIES: [TaskCategory; 4] = [
    TaskCategory::Productividad,
    TaskCategory::Alimentacion,
    TaskCategory::Ejercicio,
    TaskCategory::SaludMental,
];

/// アジェンダの1タスク。📝
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: u64,
    pub player_id: u64,
    pub titulo: String,
    pub tipo: TaskCategory,
    #[serde(default)]
    pub completed_flag: bool,
    #[serde(default)]
    pub eliminated_flag: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_json_uses_backend_names() {
        let json = r#"{"task_id":4,"player_id":7,"titulo":"Regar","tipo":"Alimentación","completed_flag":false,"eliminated_flag":false}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.tipo, TaskCategory::Alimentacion);
        assert_eq!(task.titulo, "Regar");

        let back = serde_json::to_string(&TaskCategory::SaludMental).unwrap();
        assert_eq!(back, "\"SaludMental\"");
    }

    #[test]
    fn missing_flags_default_to_false() {
        let json = r#"{"task_id":1,"player_id":7,"titulo":"Correr","tipo":"Ejercicio"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.completed_flag);
        assert!(!task.eliminated_flag);
        assert_eq!(ALL_CATEGORIES.len(), 4);
    }
}
