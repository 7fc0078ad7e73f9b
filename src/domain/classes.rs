/// Tabla cerrada de clases del modelo DETR (COCO, 91 posiciones).
/// Las entradas "N/A" son huecos del dataset original y nunca aparecen
/// como clase ganadora en la práctica.
pub const CLASSES: [&str; 91] = [
    "N/A", "persona", "bicicleta", "coche", "motocicleta", "avión", "autobús", "tren",
    "camión", "barco", "semáforo", "hidrante", "N/A", "señal de stop", "parquímetro",
    "banco", "pájaro", "gato", "perro", "caballo", "oveja", "vaca", "elefante", "oso",
    "cebra", "jirafa", "N/A", "mochila", "paraguas", "N/A", "N/A", "bolso", "corbata",
    "maleta", "frisbee", "esquís", "snowboard", "pelota", "cometa", "bate de béisbol",
    "guante de béisbol", "monopatín", "tabla de surf", "raqueta de tenis", "botella",
    "N/A", "copa de vino", "taza", "tenedor", "cuchillo", "cuchara", "tazón", "plátano",
    "manzana", "sándwich", "naranja", "brócoli", "zanahoria", "perrito caliente",
    "pizza", "donut", "pastel", "silla", "sofá", "planta", "cama", "N/A", "mesa",
    "N/A", "N/A", "inodoro", "N/A", "televisor", "portátil", "ratón", "mando",
    "teclado", "móvil", "microondas", "horno", "tostadora", "fregadero", "nevera",
    "N/A", "libro", "reloj", "jarrón", "tijeras", "peluche", "secador", "cepillo",
];

/// Paleta fija para las cajas; se recorre cíclicamente por id de clase.
pub const COLORS: [&str; 10] = [
    "#fe938c", "#86e7b8", "#f9ebe0", "#208aae", "#fe4a49",
    "#291711", "#5f4b66", "#b98b82", "#87f5fb", "#63326e",
];

pub fn label_for(class_id: usize) -> &'static str {
    CLASSES.get(class_id).copied().unwrap_or("objeto")
}

pub fn color_for(class_id: usize) -> &'static str {
    COLORS[class_id % COLORS.len()]
}
