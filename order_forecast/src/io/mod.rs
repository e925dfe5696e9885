pub mod dataframe;
