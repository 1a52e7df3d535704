use chrono::{DateTime, Utc};
use std::collections::HashMap;

use super::{Book, BorrowRecord, BorrowerId, Isbn, LibraryError, NewBook, Result};

/// Library集約 - 書籍の登録簿と貸出履歴
///
/// 不変条件：
/// - ISBNは登録簿内で一意
/// - 貸出記録のISBNは登録済みの書籍を指す
/// - 1つのISBNにつき未返却の記録は高々1件
///
/// 書籍は登録順に保持し、一覧・検索の結果もその順序で返す。
/// 日時は引数で受け取る（副作用なし、現在時刻の取得は呼び出し側の責務）。
#[derive(Debug, Clone, Default)]
pub struct Library {
    books: Vec<Book>,
    index: HashMap<Isbn, usize>,
    borrow_records: Vec<BorrowRecord>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// 書籍を登録する
    ///
    /// # エラー
    /// 同じISBNが登録済みの場合は`LibraryError::DuplicateBook`
    pub fn add_book(&mut self, data: NewBook) -> Result<&Book> {
        if self.index.contains_key(&data.isbn) {
            return Err(LibraryError::DuplicateBook(data.isbn));
        }

        let position = self.books.len();
        self.index.insert(data.isbn.clone(), position);
        self.books.push(Book::new(data));

        Ok(&self.books[position])
    }

    /// ISBNで書籍を取得する
    ///
    /// # エラー
    /// 未登録の場合は`LibraryError::BookNotFound`
    pub fn get_book(&self, isbn: &Isbn) -> Result<&Book> {
        self.position(isbn).map(|position| &self.books[position])
    }

    /// 貸出可能な書籍（登録順）
    pub fn get_available_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|book| book.is_available()).collect()
    }

    /// 貸出中の書籍（登録順）
    pub fn get_borrowed_books(&self) -> Vec<&Book> {
        self.books.iter().filter(|book| !book.is_available()).collect()
    }

    /// 書籍を貸し出す
    ///
    /// 成功時は書籍を貸出中にし、未返却の貸出記録を履歴に追加して返す。
    /// 失敗時は書籍の状態も履歴も変わらない。
    ///
    /// # エラー
    /// - `BookNotFound`: 未登録
    /// - `BookNotAvailable`: 貸出中
    pub fn borrow_book(
        &mut self,
        isbn: &Isbn,
        borrower_id: BorrowerId,
        borrowed_at: DateTime<Utc>,
    ) -> Result<&BorrowRecord> {
        let position = self.position(isbn)?;
        let book = &mut self.books[position];

        if !book.is_available() {
            return Err(LibraryError::BookNotAvailable(isbn.clone()));
        }

        book.mark_as_borrowed();
        self.borrow_records
            .push(BorrowRecord::open(isbn.clone(), borrower_id, borrowed_at));

        Ok(&self.borrow_records[self.borrow_records.len() - 1])
    }

    /// 書籍を返却する
    ///
    /// 最も新しい未返却の記録に返却日を設定し、書籍を貸出可能に戻す。
    ///
    /// # エラー
    /// - `BookNotFound`: 未登録
    /// - `InvalidReturn`: 貸出されていない
    /// - `MissingBorrowRecord`: 貸出中なのに未返却の記録がない（書籍の状態は変えない）
    pub fn return_book(&mut self, isbn: &Isbn, returned_at: DateTime<Utc>) -> Result<&Book> {
        let position = self.position(isbn)?;

        if self.books[position].is_available() {
            return Err(LibraryError::InvalidReturn(isbn.clone()));
        }

        let record = self
            .borrow_records
            .iter_mut()
            .rev()
            .find(|record| record.isbn == *isbn && record.is_open())
            .ok_or_else(|| LibraryError::MissingBorrowRecord(isbn.clone()))?;

        record.close(returned_at);
        self.books[position].mark_as_returned();

        Ok(&self.books[position])
    }

    /// 貸出履歴を作成順で返す
    ///
    /// ISBNを指定した場合はその書籍の記録のみ。戻り値は内部履歴のコピー。
    pub fn get_borrow_history(&self, isbn: Option<&Isbn>) -> Vec<BorrowRecord> {
        match isbn {
            Some(isbn) => self
                .borrow_records
                .iter()
                .filter(|record| record.isbn == *isbn)
                .cloned()
                .collect(),
            None => self.borrow_records.clone(),
        }
    }

    /// タイトル・著者・ISBNの部分一致検索（大文字小文字を区別しない）
    ///
    /// 空の検索語はすべての書籍に一致する。
    pub fn search_books(&self, query: &str) -> Vec<&Book> {
        let needle = query.to_lowercase();
        self.books
            .iter()
            .filter(|book| book.matches(&needle))
            .collect()
    }

    /// 全書籍（登録順）
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn position(&self, isbn: &Isbn) -> Result<usize> {
        self.index
            .get(isbn)
            .copied()
            .ok_or_else(|| LibraryError::BookNotFound(isbn.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn new_book(isbn: &str, title: &str, author: &str, year: i32) -> NewBook {
        NewBook {
            isbn: Isbn::from(isbn),
            title: title.to_string(),
            author: author.to_string(),
            year,
        }
    }

    fn clean_code() -> NewBook {
        new_book("1234", "Clean Code", "Robert C. Martin", 2008)
    }

    #[test]
    fn test_add_book_registers_available_book() {
        let mut library = Library::new();

        let book = library.add_book(clean_code()).unwrap();
        assert_eq!(book.isbn().value(), "1234");
        assert!(book.is_available());

        assert_eq!(library.len(), 1);
        assert_eq!(library.get_available_books().len(), 1);
    }

    #[test]
    fn test_add_book_rejects_duplicate_isbn() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();

        let result = library.add_book(new_book("1234", "Other", "Someone", 1999));
        assert_eq!(
            result.unwrap_err(),
            LibraryError::DuplicateBook(Isbn::from("1234"))
        );

        // 既存の書籍は上書きされない
        assert_eq!(library.len(), 1);
        assert_eq!(
            library.get_book(&Isbn::from("1234")).unwrap().title(),
            "Clean Code"
        );
    }

    #[test]
    fn test_get_book_not_found() {
        let library = Library::new();
        let result = library.get_book(&Isbn::from("nonexistent"));
        assert_eq!(
            result.unwrap_err(),
            LibraryError::BookNotFound(Isbn::from("nonexistent"))
        );
    }

    #[test]
    fn test_borrow_book_creates_open_record() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();
        let borrowed_at = Utc::now();

        let record = library
            .borrow_book(&Isbn::from("1234"), BorrowerId::from("user123"), borrowed_at)
            .unwrap();
        assert_eq!(record.isbn.value(), "1234");
        assert_eq!(record.borrower_id.value(), "user123");
        assert_eq!(record.borrow_date, borrowed_at);
        assert!(record.is_open());

        assert!(library.get_available_books().is_empty());
        assert_eq!(library.get_borrowed_books().len(), 1);
    }

    #[test]
    fn test_borrow_book_not_found() {
        let mut library = Library::new();
        let result = library.borrow_book(&Isbn::from("9999"), BorrowerId::from("u"), Utc::now());
        assert_eq!(
            result.unwrap_err(),
            LibraryError::BookNotFound(Isbn::from("9999"))
        );
        assert!(library.get_borrow_history(None).is_empty());
    }

    #[test]
    fn test_borrow_book_twice_fails_without_side_effects() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();
        let isbn = Isbn::from("1234");
        let borrowed_at = Utc::now();

        library
            .borrow_book(&isbn, BorrowerId::from("user123"), borrowed_at)
            .unwrap();
        let history_before = library.get_borrow_history(None);

        let result = library.borrow_book(
            &isbn,
            BorrowerId::from("user456"),
            borrowed_at + Duration::hours(1),
        );
        assert_eq!(result.unwrap_err(), LibraryError::BookNotAvailable(isbn.clone()));

        assert!(!library.get_book(&isbn).unwrap().is_available());
        assert_eq!(library.get_borrow_history(None), history_before);
    }

    #[test]
    fn test_return_book_closes_record() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();
        let isbn = Isbn::from("1234");
        let borrowed_at = Utc::now();
        let returned_at = borrowed_at + Duration::days(7);

        library
            .borrow_book(&isbn, BorrowerId::from("user123"), borrowed_at)
            .unwrap();
        let book = library.return_book(&isbn, returned_at).unwrap();
        assert!(book.is_available());

        let history = library.get_borrow_history(Some(&isbn));
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].return_date, Some(returned_at));
    }

    #[test]
    fn test_return_book_never_borrowed() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();

        let result = library.return_book(&Isbn::from("1234"), Utc::now());
        assert_eq!(
            result.unwrap_err(),
            LibraryError::InvalidReturn(Isbn::from("1234"))
        );
    }

    #[test]
    fn test_return_book_not_found() {
        let mut library = Library::new();
        let result = library.return_book(&Isbn::from("1234"), Utc::now());
        assert_eq!(
            result.unwrap_err(),
            LibraryError::BookNotFound(Isbn::from("1234"))
        );
    }

    // 貸出中なのに未返却の記録がない不整合状態は、黙って返却扱いにしない
    #[test]
    fn test_return_book_without_open_record_is_rejected() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();
        let isbn = Isbn::from("1234");
        library.books[0].mark_as_borrowed();

        let result = library.return_book(&isbn, Utc::now());
        assert_eq!(
            result.unwrap_err(),
            LibraryError::MissingBorrowRecord(isbn.clone())
        );
        assert!(!library.get_book(&isbn).unwrap().is_available());
        assert!(library.get_borrow_history(None).is_empty());
    }

    #[test]
    fn test_return_closes_only_the_open_record() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();
        let isbn = Isbn::from("1234");
        let t0 = Utc::now();

        library.borrow_book(&isbn, BorrowerId::from("a"), t0).unwrap();
        library.return_book(&isbn, t0 + Duration::days(1)).unwrap();
        library
            .borrow_book(&isbn, BorrowerId::from("b"), t0 + Duration::days(2))
            .unwrap();
        library.return_book(&isbn, t0 + Duration::days(3)).unwrap();

        let history = library.get_borrow_history(Some(&isbn));
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].return_date, Some(t0 + Duration::days(1)));
        assert_eq!(history[1].borrower_id.value(), "b");
        assert_eq!(history[1].return_date, Some(t0 + Duration::days(3)));
    }

    #[test]
    fn test_borrow_history_preserves_creation_order() {
        let mut library = Library::new();
        library.add_book(new_book("1001", "The Secret", "Om Panchwate", 2024)).unwrap();
        library
            .add_book(new_book("1002", "Life Amazing Secret", "Gaur Gopal Das", 2022))
            .unwrap();
        let t0 = Utc::now();

        library
            .borrow_book(&Isbn::from("1001"), BorrowerId::from("a"), t0)
            .unwrap();
        library
            .borrow_book(&Isbn::from("1002"), BorrowerId::from("b"), t0 + Duration::minutes(1))
            .unwrap();
        library
            .return_book(&Isbn::from("1001"), t0 + Duration::minutes(2))
            .unwrap();
        library
            .borrow_book(&Isbn::from("1001"), BorrowerId::from("c"), t0 + Duration::minutes(3))
            .unwrap();

        let all: Vec<_> = library
            .get_borrow_history(None)
            .into_iter()
            .map(|r| r.borrower_id.value().to_string())
            .collect();
        assert_eq!(all, vec!["a", "b", "c"]);

        let only_1001: Vec<_> = library
            .get_borrow_history(Some(&Isbn::from("1001")))
            .into_iter()
            .map(|r| r.borrower_id.value().to_string())
            .collect();
        assert_eq!(only_1001, vec!["a", "c"]);
    }

    #[test]
    fn test_borrow_history_is_a_copy() {
        let mut library = Library::new();
        library.add_book(clean_code()).unwrap();
        let isbn = Isbn::from("1234");
        library
            .borrow_book(&isbn, BorrowerId::from("user123"), Utc::now())
            .unwrap();

        let mut history = library.get_borrow_history(None);
        history.clear();

        assert_eq!(library.get_borrow_history(None).len(), 1);
    }

    #[test]
    fn test_search_books() {
        let mut library = Library::new();
        library.add_book(new_book("1001", "The Secret", "Om Panchwate", 2024)).unwrap();
        library
            .add_book(new_book("1002", "Life Amazing Secret", "Gaur Gopal Das", 2022))
            .unwrap();
        library.add_book(clean_code()).unwrap();

        let titles = |books: Vec<&Book>| -> Vec<String> {
            books.iter().map(|b| b.title().to_string()).collect()
        };

        assert_eq!(
            titles(library.search_books("SECRET")),
            vec!["The Secret", "Life Amazing Secret"]
        );
        assert_eq!(titles(library.search_books("gopal")), vec!["Life Amazing Secret"]);
        assert_eq!(titles(library.search_books("123")), vec!["Clean Code"]);
        assert!(library.search_books("dostoevsky").is_empty());
        assert_eq!(library.search_books("").len(), 3);
    }
}
