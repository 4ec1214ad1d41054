mod output_paths;
mod printer;
