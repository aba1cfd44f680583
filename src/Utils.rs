//! different utility modules used throughout the project
/// logger setup and saving samples into a file
pub mod logger;
/// render surfaces: plotters bitmaps and gnuplot
pub mod plots;
/// parse a task document with structure like "title1 key1: value1 key2: value2 title2 key3: value3" into a plot task
pub mod task_parser;
