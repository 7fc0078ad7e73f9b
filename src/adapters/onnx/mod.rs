pub mod detr_engine;
