pub mod marks_reader;
