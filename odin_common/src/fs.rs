/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::fs::{self,File};
use std::io::{self,Read,Write,ErrorKind::*};
use std::path::{Path,PathBuf};
use regex::Regex;

use crate::macros::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

pub fn ensure_dir (path: impl AsRef<Path>)->io::Result<()> {
    let path = path.as_ref();
    if !path.is_dir() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// check if dir pathname exists and is writable, try to create dir otherwise
pub fn ensure_writable_dir (path: impl AsRef<Path>) -> io::Result<()> {
    let path = path.as_ref();
    if path.is_dir() {
        let md = fs::metadata(&path)?;
        if md.permissions().readonly() {
            Err(io_error!(PermissionDenied, "output_dir {:?} not writable", &path))
        } else {
            Ok(())
        }

    } else {
        fs::create_dir_all(path)
    }
}

/// return an existing, regular file. Fails with NotFound if path does not exist or is not a file
pub fn existing_file (path: impl AsRef<Path>) -> Result<File> {
    let path = path.as_ref();
    if path.is_file() {
        File::open(path)
    } else {
        Err(io_error!(NotFound, "not a regular file {:?}", path))
    }
}

pub fn file_contents_as_string (file: &mut fs::File) -> Result<String> {
    let len = file.metadata()?.len();
    let mut contents = String::with_capacity(len as usize);
    file.read_to_string(&mut contents)?;
    Ok(contents)
}

pub fn filepath_contents_as_string <P: AsRef<Path>> (path: &P) -> Result<String> {
    let mut file = File::open(path)?;
    file_contents_as_string( &mut file)
}

/// the files in `dir` with names that match `fname_regex`, in lexicographic order of their names.
/// A non-existing dir yields an empty list
pub fn matching_files_in_dir<P: AsRef<Path>> (dir: &P, fname_regex: &Regex) -> Result<Vec<PathBuf>> {
    let dir: &Path = dir.as_ref();
    let mut list: Vec<PathBuf> = Vec::new();

    if dir.is_dir() {
        for entry in fs::read_dir(dir)? {
            if let Ok(entry) = entry {
                if let Some(fname) = entry.file_name().to_str() {
                    if fname_regex.is_match( fname) && entry.path().is_file() {
                        list.push(entry.path())
                    }
                }
            }
        }
    }

    list.sort();
    Ok(list)
}

/// remove all given files, returning the number of files removed. Stops at the first failure
pub fn remove_files (paths: &[PathBuf]) -> Result<usize> {
    let mut n = 0;
    for p in paths {
        fs::remove_file(p)?;
        n += 1;
    }
    Ok(n)
}

/// the path we use to stage new file contents before they become visible under `path`
pub fn staging_path (path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut fname = path.file_name().map( |s| s.to_os_string()).unwrap_or_default();
    fname.push(".tmp");
    path.with_file_name(fname)
}

/// replace the contents of the file at `path`. New contents are first written to a staging file
/// which is then renamed, so that readers never see partial contents
pub fn set_filepath_contents (path: impl AsRef<Path>, new_contents: &[u8]) -> Result<()> {
    let path = path.as_ref();
    let tmp_path = staging_path(path);
    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(new_contents)?;
        file.flush()?;
    }
    fs::rename( &tmp_path, path)
}
