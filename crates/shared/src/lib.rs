use serde::{Deserialize, Serialize};

/// Идентификатор типа объекта в каталоге (например, `"ledge"`)
pub type ObjectType = String;

/// Имя парка по умолчанию
pub const DEFAULT_PARK_NAME: &str = "My Skatepark";

fn default_scale() -> f64 {
    1.0
}

fn default_park_name() -> String {
    DEFAULT_PARK_NAME.to_string()
}

/// Позиция объекта в мировых координатах редактора (метры)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Position {
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Поворот объекта. Экспорт учитывает только рыскание (`y`, радианы);
/// наклоны по `x`/`z` редактор не поддерживает
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Rotation {
    #[serde(default)]
    pub y: f64,
}

/// Размещённый в парке объект — снимок состояния редактора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedInstance {
    /// Ключ в каталоге объектов
    #[serde(rename = "type")]
    pub kind: ObjectType,
    #[serde(default)]
    pub position: Position,
    #[serde(default)]
    pub rotation: Rotation,
    /// Равномерный масштаб (> 0)
    #[serde(default = "default_scale")]
    pub scale: f64,
}

impl PlacedInstance {
    pub fn new(kind: impl Into<ObjectType>, position: [f64; 3], yaw: f64, scale: f64) -> Self {
        Self {
            kind: kind.into(),
            position: Position::new(position[0], position[1], position[2]),
            rotation: Rotation { y: yaw },
            scale,
        }
    }

    /// Рыскание в радианах
    pub fn yaw(&self) -> f64 {
        self.rotation.y
    }
}

/// Документ парка, который редактор отправляет на экспорт
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParkDescription {
    #[serde(default = "default_park_name")]
    pub name: String,
    #[serde(default)]
    pub objects: Vec<PlacedInstance>,
}

impl Default for ParkDescription {
    fn default() -> Self {
        Self {
            name: default_park_name(),
            objects: Vec::new(),
        }
    }
}

/// Элемент каталога для палитры редактора
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Идентификатор типа
    pub id: ObjectType,
    /// Отображаемое имя
    pub name: String,
}

/// Ошибка экспорта в формате ответа сервера
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFailure {
    pub error: String,
}
