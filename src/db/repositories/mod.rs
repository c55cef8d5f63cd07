mod predictions;
mod readings;
