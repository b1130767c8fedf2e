pub mod pixel_mapping;
