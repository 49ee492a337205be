pub mod auth_service;

pub mod hashtag_service;

pub mod photo_service;
